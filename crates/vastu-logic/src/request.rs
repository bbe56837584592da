//! Design request model and boundary validation.
//!
//! The request arrives as JSON at the edge of the system. The layout
//! engine trusts what it is given; [`validate_request`] is for the caller
//! that owns the boundary.
//!
//! ```
//! use vastu_logic::request::{validate_request, DesignRequest};
//!
//! let request = DesignRequest::default();
//! assert!(validate_request(&request).is_empty());
//! ```

use serde::{Deserialize, Serialize};

use crate::rules::Strictness;

/// Upper bound on how many options one request may ask for.
pub const MAX_PLANS: u32 = 10;

/// Upper bound on bedrooms, and separately on bathrooms.
pub const MAX_ROOMS_PER_KIND: u32 = 20;

/// Plot dimensions and orientation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlotDetails {
    pub length: f32,
    pub width: f32,
    pub unit: String,
    pub shape: String,
    pub facing: String,
}

impl Default for PlotDetails {
    fn default() -> Self {
        Self {
            length: 40.0,
            width: 30.0,
            unit: "ft".to_string(),
            shape: "rectangle".to_string(),
            facing: "east".to_string(),
        }
    }
}

/// Building shape, including the free-text floor descriptor ("G+1", "2", ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuildingConfig {
    pub floors: String,
    pub building_type: String,
    #[serde(default)]
    pub built_up_area: Option<f32>,
}

impl Default for BuildingConfig {
    fn default() -> Self {
        Self {
            floors: "G+1".to_string(),
            building_type: "independent_house".to_string(),
            built_up_area: None,
        }
    }
}

/// Which rooms the household needs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomRequirements {
    pub bedrooms: u32,
    pub bathrooms: u32,
    pub kitchen: bool,
    pub living_room: bool,
    pub dining_area: bool,
    pub pooja_room: bool,
    #[serde(default)]
    pub study_room: bool,
    #[serde(default)]
    pub balcony: bool,
    pub parking: bool,
}

impl Default for RoomRequirements {
    fn default() -> Self {
        Self {
            bedrooms: 3,
            bathrooms: 2,
            kitchen: true,
            living_room: true,
            dining_area: true,
            pooja_room: true,
            study_room: false,
            balcony: false,
            parking: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputPreferences {
    #[serde(default = "default_plan_count")]
    pub number_of_plans: u32,
}

fn default_plan_count() -> u32 {
    3
}

impl Default for OutputPreferences {
    fn default() -> Self {
        Self {
            number_of_plans: default_plan_count(),
        }
    }
}

/// A complete residential design request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DesignRequest {
    pub plot: PlotDetails,
    pub building: BuildingConfig,
    pub rooms: RoomRequirements,
    /// Compliance level: "high", "medium", anything else is low.
    #[serde(default)]
    pub vastu_preference: String,
    /// Older clients send the level here, often alongside `vastu_preference`.
    #[serde(default)]
    pub vastu_level: Option<String>,
    #[serde(default)]
    pub output: OutputPreferences,
}

impl DesignRequest {
    /// `vastu_preference` wins; a blank one falls back to `vastu_level`.
    pub fn strictness(&self) -> Strictness {
        let level = match self.vastu_level.as_deref() {
            Some(level) if self.vastu_preference.trim().is_empty() => level,
            _ => self.vastu_preference.as_str(),
        };
        Strictness::parse(level)
    }
}

impl Default for DesignRequest {
    fn default() -> Self {
        Self {
            plot: PlotDetails::default(),
            building: BuildingConfig::default(),
            rooms: RoomRequirements::default(),
            vastu_preference: "high".to_string(),
            vastu_level: None,
            output: OutputPreferences::default(),
        }
    }
}

/// Request validation error.
#[derive(Debug, Clone, PartialEq)]
pub enum RequestError {
    /// Plot length or width is zero, negative or not a number.
    InvalidPlotDimension(f32),
    /// Floor descriptor is blank.
    EmptyFloorDescriptor,
    /// Asked for zero options.
    NoPlansRequested,
    /// Asked for more than [`MAX_PLANS`] options.
    TooManyPlans(u32),
    /// More than [`MAX_ROOMS_PER_KIND`] bedrooms.
    TooManyBedrooms(u32),
    /// More than [`MAX_ROOMS_PER_KIND`] bathrooms.
    TooManyBathrooms(u32),
}

/// Validate a request, returning all errors found.
pub fn validate_request(request: &DesignRequest) -> Vec<RequestError> {
    let mut errors = Vec::new();

    for dim in [request.plot.length, request.plot.width] {
        if dim.is_nan() || dim <= 0.0 {
            errors.push(RequestError::InvalidPlotDimension(dim));
        }
    }
    if request.building.floors.trim().is_empty() {
        errors.push(RequestError::EmptyFloorDescriptor);
    }
    match request.output.number_of_plans {
        0 => errors.push(RequestError::NoPlansRequested),
        n if n > MAX_PLANS => errors.push(RequestError::TooManyPlans(n)),
        _ => {}
    }
    if request.rooms.bedrooms > MAX_ROOMS_PER_KIND {
        errors.push(RequestError::TooManyBedrooms(request.rooms.bedrooms));
    }
    if request.rooms.bathrooms > MAX_ROOMS_PER_KIND {
        errors.push(RequestError::TooManyBathrooms(request.rooms.bathrooms));
    }

    errors
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_request_is_valid() {
        let errors = validate_request(&DesignRequest::default());
        assert!(errors.is_empty(), "default request invalid: {errors:?}");
    }

    #[test]
    fn bad_plot_dimensions() {
        let mut request = DesignRequest::default();
        request.plot.length = 0.0;
        request.plot.width = -3.0;
        let errors = validate_request(&request);
        assert!(errors.contains(&RequestError::InvalidPlotDimension(0.0)));
        assert!(errors.contains(&RequestError::InvalidPlotDimension(-3.0)));
    }

    #[test]
    fn nan_dimension_rejected() {
        let mut request = DesignRequest::default();
        request.plot.width = f32::NAN;
        let errors = validate_request(&request);
        assert!(errors
            .iter()
            .any(|e| matches!(e, RequestError::InvalidPlotDimension(_))));
    }

    #[test]
    fn blank_floors() {
        let mut request = DesignRequest::default();
        request.building.floors = "  ".to_string();
        assert!(validate_request(&request).contains(&RequestError::EmptyFloorDescriptor));
    }

    #[test]
    fn plan_count_bounds() {
        let mut request = DesignRequest::default();
        request.output.number_of_plans = 0;
        assert!(validate_request(&request).contains(&RequestError::NoPlansRequested));
        request.output.number_of_plans = 11;
        assert!(validate_request(&request).contains(&RequestError::TooManyPlans(11)));
    }

    #[test]
    fn deserializes_legacy_field_names() {
        let json = r#"{
            "plot": {"length": 40, "width": 30, "unit": "ft", "shape": "rectangle", "facing": "east"},
            "building": {"floors": "G+1", "building_type": "independent_house"},
            "rooms": {"bedrooms": 3, "bathrooms": 2, "kitchen": true, "living_room": true,
                      "dining_area": true, "pooja_room": true, "parking": true},
            "vastu_level": "High"
        }"#;
        let request: DesignRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.strictness(), Strictness::High);
        assert_eq!(request.output.number_of_plans, 3);
        assert!(!request.rooms.study_room);
        assert!(request.building.built_up_area.is_none());
    }

    #[test]
    fn room_count_bounds() {
        let mut request = DesignRequest::default();
        request.rooms.bedrooms = MAX_ROOMS_PER_KIND;
        request.rooms.bathrooms = MAX_ROOMS_PER_KIND;
        assert!(validate_request(&request).is_empty());

        request.rooms.bedrooms = 4_000_000_000;
        request.rooms.bathrooms = MAX_ROOMS_PER_KIND + 1;
        let errors = validate_request(&request);
        assert!(errors.contains(&RequestError::TooManyBedrooms(4_000_000_000)));
        assert!(errors.contains(&RequestError::TooManyBathrooms(MAX_ROOMS_PER_KIND + 1)));
    }

    #[test]
    fn accepts_both_level_fields() {
        let json = r#"{
            "plot": {"length": 40, "width": 30, "unit": "ft", "shape": "rectangle", "facing": "east"},
            "building": {"floors": "G+1", "building_type": "independent_house"},
            "rooms": {"bedrooms": 3, "bathrooms": 2, "kitchen": true, "living_room": true,
                      "dining_area": true, "pooja_room": true, "parking": true},
            "vastu_preference": "medium",
            "vastu_level": "high"
        }"#;
        let request: DesignRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.vastu_level.as_deref(), Some("high"));
        assert_eq!(request.strictness(), Strictness::Medium);
    }

    #[test]
    fn blank_preference_falls_back_to_level() {
        let request = DesignRequest {
            vastu_preference: " ".to_string(),
            vastu_level: Some("Medium".to_string()),
            ..DesignRequest::default()
        };
        assert_eq!(request.strictness(), Strictness::Medium);
    }
}
