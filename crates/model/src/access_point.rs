use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::ExampleData;

#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct AccessPoint {
    pub id: i64,
    pub gov_id: Option<String>,
    pub program: Option<String>,
    pub install_date: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub neighborhood: Option<String>,
    pub borough: Option<String>,
}

impl AccessPoint {
    /// Both coordinates, or `None` when either is missing. Records without a
    /// full position cannot take part in proximity lookups.
    pub fn coordinates(&self) -> Option<(f64, f64)> {
        self.latitude.zip(self.longitude)
    }
}

impl ExampleData for AccessPoint {
    fn example_data() -> Self {
        AccessPoint {
            id: 1,
            gov_id: Some("MX_DF_CDMX_1".to_owned()),
            program: Some("Internet para todos".to_owned()),
            install_date: Some("2023-01-15".to_owned()),
            latitude: Some(19.4326077),
            longitude: Some(-99.133208),
            neighborhood: Some("Centro".to_owned()),
            borough: Some("Cuauhtémoc".to_owned()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coordinates_require_both_components() {
        let mut point = AccessPoint::example_data();
        assert_eq!(point.coordinates(), Some((19.4326077, -99.133208)));

        point.longitude = None;
        assert_eq!(point.coordinates(), None);
    }

    #[test]
    fn missing_fields_are_omitted_from_json() {
        let mut point = AccessPoint::example_data();
        point.program = None;
        point.latitude = None;
        point.longitude = None;

        let json = serde_json::to_value(&point).unwrap();
        let object = json.as_object().unwrap();

        assert!(object.contains_key("govId"));
        assert!(object.contains_key("installDate"));
        assert!(!object.contains_key("program"));
        assert!(!object.contains_key("latitude"));
    }
}
