//! Command-line interface
//!
//! Every command opens the configured store, applies one operation, and
//! exits. Drawing commands run through the same flows the map UI uses, on a
//! headless surface.

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use polymap_core::{shared, Color, Coordinate, PolygonDraft, PolygonId, PolygonRecord};
use polymap_designer::{
    initial_camera, label_anchor, AddPolygonFlow, FixedLocation, GeolocationState,
    HeadlessSurface, MapEvent, MapView,
};
use polymap_settings::{Config, SettingsManager};
use polymap_store::{FileStorage, PolygonStore, PolygonUiController, StoredDocument};
use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;

/// Draw, label and persist priced map polygons
#[derive(Parser, Debug)]
#[command(name = "polymap")]
#[command(author, version)]
#[command(about = "Draw, label and persist priced map polygons")]
pub struct Cli {
    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Configuration file (.toml or .json)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Directory holding the polygon storage file
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List saved polygons in insertion order
    List {
        /// Print the records as JSON
        #[arg(long)]
        json: bool,
    },

    /// Draw a polygon from its vertices and save it
    Add {
        #[arg(short, long)]
        name: String,

        #[arg(short, long, allow_negative_numbers = true)]
        price: f64,

        /// Hex color (#RRGGBB) or preset name; configured default if omitted
        #[arg(short, long)]
        color: Option<String>,

        /// Vertex as LAT,LNG; repeat in drawing order
        #[arg(long = "point", value_parser = parse_point, allow_hyphen_values = true, required = true)]
        points: Vec<Coordinate>,
    },

    /// Change the name and/or price of a polygon
    Edit {
        id: String,

        #[arg(long)]
        name: Option<String>,

        #[arg(long, allow_hyphen_values = true)]
        price: Option<String>,
    },

    /// Delete a polygon by id, or every polygon with a name
    Delete {
        #[arg(required_unless_present = "name")]
        id: Option<String>,

        #[arg(long, conflicts_with = "id")]
        name: Option<String>,
    },

    /// Delete every polygon
    Clear,

    /// Replace the collection with records from a JSON file
    Import {
        path: PathBuf,

        /// Append to the collection instead of replacing it
        #[arg(long)]
        append: bool,
    },

    /// Write the collection as JSON to a file or stdout
    Export { output: Option<PathBuf> },

    /// Render the home map and print each label with its anchor
    Labels {
        /// Device location as LAT,LNG; the configured fallback when omitted
        #[arg(long, value_parser = parse_point, allow_hyphen_values = true)]
        at: Option<Coordinate>,
    },
}

/// Parses `LAT,LNG`.
pub fn parse_point(value: &str) -> std::result::Result<Coordinate, String> {
    let (lat, lng) = value
        .split_once(',')
        .ok_or_else(|| format!("expected LAT,LNG, got '{}'", value))?;
    let lat: f64 = lat
        .trim()
        .parse()
        .map_err(|_| format!("invalid latitude '{}'", lat.trim()))?;
    let lng: f64 = lng
        .trim()
        .parse()
        .map_err(|_| format!("invalid longitude '{}'", lng.trim()))?;
    Coordinate::new(lat, lng).map_err(|e| e.to_string())
}

struct Workspace {
    config: Config,
    data_dir: PathBuf,
    store: Arc<PolygonStore>,
}

impl Workspace {
    fn open(cli: &Cli) -> Result<Self> {
        let config =
            SettingsManager::load(cli.config.as_deref()).context("Failed to load configuration")?;
        let data_dir = match &cli.data_dir {
            Some(dir) => dir.clone(),
            None => SettingsManager::data_dir_for(&config)?,
        };

        let backend = Arc::new(FileStorage::new(&data_dir));
        let store = PolygonStore::open(backend, config.storage.namespace_key.clone())
            .with_context(|| format!("Failed to open polygon store in {}", data_dir.display()))?;

        Ok(Self {
            config,
            data_dir,
            store: Arc::new(store),
        })
    }

    fn controller(&self) -> PolygonUiController {
        PolygonUiController::with_currency(self.store.clone(), self.config.labels.currency.clone())
    }

    /// The store never fails a mutation; the CLI still refuses to exit 0
    /// when nothing reached the disk.
    fn ensure_persisted(&self) -> Result<()> {
        if self.store.persist_failures() > 0 {
            anyhow::bail!(
                "Changes could not be written to {}; see the log for details",
                self.data_dir.display()
            );
        }
        Ok(())
    }
}

/// Runs `cli`, writing command output to stdout.
pub fn run(cli: Cli) -> Result<()> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    run_with(cli, &mut out)
}

/// Runs `cli`, writing command output to `out`.
pub fn run_with<W: Write>(cli: Cli, out: &mut W) -> Result<()> {
    let ws = Workspace::open(&cli)?;
    tracing::debug!("Running {:?}", cli.command);

    match cli.command {
        Commands::List { json } => cmd_list(&ws, json, out),
        Commands::Add {
            name,
            price,
            color,
            points,
        } => cmd_add(&ws, &name, price, color.as_deref(), &points, out),
        Commands::Edit { id, name, price } => cmd_edit(&ws, &id, name, price, out),
        Commands::Delete { id, name } => cmd_delete(&ws, id, name, out),
        Commands::Clear => {
            let removed = ws.store.len();
            ws.controller().clear_all();
            ws.ensure_persisted()?;
            writeln!(out, "Removed {} polygons", removed)?;
            Ok(())
        }
        Commands::Import { path, append } => cmd_import(&ws, &path, append, out),
        Commands::Export { output } => cmd_export(&ws, output, out),
        Commands::Labels { at } => cmd_labels(&ws, at, out),
    }
}

fn cmd_list<W: Write>(ws: &Workspace, json: bool, out: &mut W) -> Result<()> {
    if json {
        writeln!(out, "{}", serde_json::to_string_pretty(&ws.store.polygons())?)?;
        return Ok(());
    }

    let polygons = ws.controller().get_ui_polygons();
    if polygons.is_empty() {
        writeln!(out, "No polygons saved")?;
        return Ok(());
    }

    for p in polygons {
        let created = PolygonId::from(p.id.as_str())
            .created_at()
            .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
            .unwrap_or_else(|| "-".to_string());
        writeln!(
            out,
            "{}  {:<24} {:>12}  {}  {} points  {}",
            p.id, p.name, p.price_label, p.color, p.vertex_count, created
        )?;
    }
    Ok(())
}

fn cmd_add<W: Write>(
    ws: &Workspace,
    name: &str,
    price: f64,
    color: Option<&str>,
    points: &[Coordinate],
    out: &mut W,
) -> Result<()> {
    let color: Color = match color {
        Some(value) => value.parse()?,
        None => ws.config.drawing.default_color.clone(),
    };

    let surface = shared(HeadlessSurface::new());
    let mut flow = AddPolygonFlow::new(ws.store.clone(), surface, &ws.config.drawing);
    for point in points {
        flow.handle(MapEvent::Click(*point));
    }
    flow.handle(MapEvent::Complete);

    let record = flow
        .submit(name, price, color)
        .with_context(|| format!("Polygon '{}' was not saved", name))?;
    ws.ensure_persisted()?;

    writeln!(out, "Saved '{}' ({})", record.name, record.id)?;
    Ok(())
}

fn cmd_edit<W: Write>(
    ws: &Workspace,
    id: &str,
    name: Option<String>,
    price: Option<String>,
    out: &mut W,
) -> Result<()> {
    let controller = ws.controller();
    let current = controller.select(&PolygonId::from(id))?;

    let name = name.unwrap_or(current.name);
    let edited = match price {
        Some(price) => controller.edit_selected(&name, &price)?,
        None => controller.rename_selected(&name)?,
    };
    ws.ensure_persisted()?;

    writeln!(
        out,
        "Updated {}: '{}' {}",
        edited.id,
        edited.name,
        ws.config.labels.currency.format(Some(edited.price))
    )?;
    Ok(())
}

fn cmd_delete<W: Write>(
    ws: &Workspace,
    id: Option<String>,
    name: Option<String>,
    out: &mut W,
) -> Result<()> {
    let removed = match (id, name) {
        (Some(id), _) => {
            let controller = ws.controller();
            controller.select(&PolygonId::from(id.as_str()))?;
            controller.delete_selected()?;
            1
        }
        (None, Some(name)) => {
            let target = ws
                .store
                .polygons()
                .into_iter()
                .find(|p| p.name == name)
                .with_context(|| format!("No polygon named '{}'", name))?;
            ws.store.delete_by_name(&target)
        }
        (None, None) => anyhow::bail!("Either an id or --name is required"),
    };
    ws.ensure_persisted()?;

    writeln!(out, "Deleted {} polygon(s)", removed)?;
    Ok(())
}

fn cmd_import<W: Write>(
    ws: &Workspace,
    path: &std::path::Path,
    append: bool,
    out: &mut W,
) -> Result<()> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let imported = StoredDocument::decode_import(&path.display().to_string(), &text)?;

    let records = imported
        .iter()
        .enumerate()
        .map(|(index, record)| {
            let draft = PolygonDraft {
                name: record.name.clone(),
                price: record.price,
                color: record.color.clone(),
                coordinates: record.coordinates.clone(),
            };
            draft
                .validate_with_id(record.id.clone())
                .with_context(|| format!("Record {} ('{}') is invalid", index, record.name))
        })
        .collect::<Result<Vec<PolygonRecord>>>()?;

    let count = records.len();
    if append {
        let mut all = ws.store.polygons();
        all.extend(records);
        ws.store.replace_all(all);
    } else {
        ws.store.replace_all(records);
    }
    ws.ensure_persisted()?;

    writeln!(out, "Imported {} polygons", count)?;
    Ok(())
}

fn cmd_export<W: Write>(ws: &Workspace, output: Option<PathBuf>, out: &mut W) -> Result<()> {
    let document = StoredDocument::new(ws.store.polygons());
    let text = serde_json::to_string_pretty(&document)?;

    match output {
        Some(path) => {
            std::fs::write(&path, text)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            writeln!(
                out,
                "Exported {} polygons to {}",
                document.state.polygons.len(),
                path.display()
            )?;
        }
        None => writeln!(out, "{}", text)?,
    }
    Ok(())
}

fn cmd_labels<W: Write>(ws: &Workspace, at: Option<Coordinate>, out: &mut W) -> Result<()> {
    let location = FixedLocation(match at {
        Some(at) => GeolocationState::Resolved(at),
        None => GeolocationState::Unavailable,
    });
    if let Some(camera) = initial_camera(&location, &ws.config.map) {
        writeln!(out, "Map centered at {} (zoom {})", camera.center, camera.zoom)?;
    }

    let surface = shared(HeadlessSurface::new());
    let mut view = MapView::new(ws.store.clone(), surface, &ws.config);
    view.render();

    for overlay in view.overlays() {
        let label = overlay.label();
        match label_anchor(overlay.path()) {
            Some(anchor) => writeln!(out, "{} {} at {}", label.title, label.price, anchor)?,
            None => writeln!(out, "{} {} (no vertices)", label.title, label.price)?,
        }
    }
    Ok(())
}
