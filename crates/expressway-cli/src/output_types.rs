use serde::Serialize;
use tabled::Tabled;

/// One row of `list`
#[derive(Debug, Serialize, Tabled)]
pub struct ExpresswayRow {
    #[tabled(rename = "ID")]
    pub id: String,
    #[tabled(rename = "Name")]
    pub name: String,
    #[tabled(rename = "Status")]
    pub status: String,
    #[tabled(rename = "Geometry")]
    pub geometry: String,
    #[tabled(rename = "Vertices")]
    pub vertices: usize,
    #[tabled(rename = "Length (km)")]
    pub length_km: String,
}

/// One vertex of `show`
#[derive(Debug, Serialize, Tabled)]
pub struct VertexRow {
    #[tabled(rename = "#")]
    pub index: usize,
    #[tabled(rename = "Longitude")]
    pub lon: f64,
    #[tabled(rename = "Latitude")]
    pub lat: f64,
}

/// Output for edit and add
#[derive(Debug, Serialize)]
pub struct SaveOutput {
    pub id: String,
    pub name: String,
    pub status: String,
    pub vertices: usize,
    pub length_km: Option<f64>,
    pub saved: bool,
}

/// One row of `config`
#[derive(Debug, Serialize, Tabled)]
pub struct ConfigRow {
    #[tabled(rename = "Key")]
    pub key: String,
    #[tabled(rename = "Value")]
    pub value: String,
    #[tabled(rename = "Source")]
    pub source: String,
}

/// One row of `provinces`
#[derive(Debug, Serialize, Tabled)]
pub struct ProvinceRow {
    #[tabled(rename = "Province")]
    pub name: String,
}
