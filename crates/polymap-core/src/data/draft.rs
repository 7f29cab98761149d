use super::{Color, Coordinate, PolygonId, PolygonRecord, MIN_POLYGON_VERTICES};
use crate::error::ValidationError;

/// Contents of the save form for a freshly drawn polygon.
///
/// The store accepts any record, so every caller goes through
/// [`PolygonDraft::validate`] before saving.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PolygonDraft {
    pub name: String,
    pub price: f64,
    pub color: Color,
    pub coordinates: Vec<Coordinate>,
}

impl PolygonDraft {
    /// Opens a draft for the vertices emitted by a completed drawing.
    pub fn for_coordinates(coordinates: Vec<Coordinate>) -> Self {
        Self {
            coordinates,
            ..Self::default()
        }
    }

    /// Whether the form's confirm action should be enabled.
    pub fn can_submit(&self) -> bool {
        validate_label(&self.name, self.price).is_ok()
    }

    /// Checks the draft and turns it into a record with a new id.
    pub fn validate(&self) -> Result<PolygonRecord, ValidationError> {
        self.validate_with_id(PolygonId::generate())
    }

    /// Checks the draft and turns it into a record keeping `id`.
    pub fn validate_with_id(&self, id: PolygonId) -> Result<PolygonRecord, ValidationError> {
        if self.coordinates.len() < MIN_POLYGON_VERTICES {
            return Err(ValidationError::TooFewVertices {
                required: MIN_POLYGON_VERTICES,
                actual: self.coordinates.len(),
            });
        }
        for (index, vertex) in self.coordinates.iter().enumerate() {
            vertex
                .validate()
                .map_err(|source| ValidationError::InvalidVertex { index, source })?;
        }
        let name = validate_label(&self.name, self.price)?;
        if !self.color.is_valid() {
            return Err(ValidationError::InvalidColor(self.color.to_string()));
        }

        Ok(PolygonRecord {
            id,
            name,
            price: self.price,
            coordinates: self.coordinates.clone(),
            color: self.color.clone(),
        })
    }
}

/// Checks the editable label fields, returning the trimmed name.
pub fn validate_label(name: &str, price: f64) -> Result<String, ValidationError> {
    let name = validate_name(name)?;
    if !(price.is_finite() && price > 0.0) {
        return Err(ValidationError::InvalidPrice { price });
    }
    Ok(name)
}

/// Returns the trimmed name, rejecting blank ones.
pub fn validate_name(name: &str) -> Result<String, ValidationError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(ValidationError::EmptyName);
    }
    Ok(name.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CoordinateError;

    fn triangle() -> Vec<Coordinate> {
        vec![
            Coordinate::new(0.0, 0.0).unwrap(),
            Coordinate::new(0.0, 1.0).unwrap(),
            Coordinate::new(1.0, 1.0).unwrap(),
        ]
    }

    fn filled(coordinates: Vec<Coordinate>) -> PolygonDraft {
        PolygonDraft {
            name: "  North field ".to_string(),
            price: 1500.0,
            color: Color::default(),
            coordinates,
        }
    }

    #[test]
    fn test_valid_draft_becomes_record() {
        let record = filled(triangle()).validate().unwrap();
        assert_eq!(record.name, "North field");
        assert_eq!(record.price, 1500.0);
        assert_eq!(record.coordinates, triangle());
    }

    #[test]
    fn test_too_few_vertices() {
        let mut coords = triangle();
        coords.pop();
        assert_eq!(
            filled(coords).validate(),
            Err(ValidationError::TooFewVertices {
                required: 3,
                actual: 2
            })
        );
    }

    #[test]
    fn test_blank_name_and_bad_price() {
        let mut draft = filled(triangle());
        draft.name = "   ".to_string();
        assert_eq!(draft.validate(), Err(ValidationError::EmptyName));
        assert!(!draft.can_submit());

        let mut draft = filled(triangle());
        draft.price = 0.0;
        assert_eq!(
            draft.validate(),
            Err(ValidationError::InvalidPrice { price: 0.0 })
        );

        draft.price = f64::NAN;
        assert!(draft.validate().is_err());
    }

    #[test]
    fn test_invalid_vertex_reports_index() {
        let mut coords = triangle();
        coords.push(Coordinate {
            lat: 95.0,
            lng: 0.0,
        });
        assert_eq!(
            filled(coords).validate(),
            Err(ValidationError::InvalidVertex {
                index: 3,
                source: CoordinateError::LatitudeOutOfRange { value: 95.0 },
            })
        );
    }

    #[test]
    fn test_validate_with_id_keeps_identity() {
        let record = filled(triangle())
            .validate_with_id(PolygonId::from("fixed"))
            .unwrap();
        assert_eq!(record.id.as_str(), "fixed");
    }
}
