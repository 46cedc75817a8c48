//! Table payload classification.
//!
//! Bot replies can carry a tabular payload whose row shape depends on the
//! query kind (places, accommodations, hospitals, ...). The shape is not
//! declared anywhere in the wire format; it is inferred from which columns
//! the first row carries. `TableKind` turns that key-presence check into a
//! tagged variant so the rendering layer never dispatches on raw strings.

use crate::chat::Row;

/// The known table payload shapes, plus a catch-all.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableKind {
    Places,
    Accommodations,
    Hospitals,
    Restaurants,
    PoliceStations,
    Weather,
    Generic,
}

impl TableKind {
    /// Classify a table payload by inspecting the first row's columns.
    ///
    /// An empty payload classifies as `Generic`.
    pub fn classify(rows: &[Row]) -> Self {
        let Some(first) = rows.first() else {
            return TableKind::Generic;
        };

        if first.contains_key("Place") && first.contains_key("Description") {
            TableKind::Places
        } else if first.contains_key("Accommodation") || first.contains_key("Type") {
            TableKind::Accommodations
        } else if first.contains_key("Hospital") || first.contains_key("Medical_Type") {
            TableKind::Hospitals
        } else if first.contains_key("Restaurant") || first.contains_key("Cuisine") {
            TableKind::Restaurants
        } else if first.contains_key("Police_Station") {
            TableKind::PoliceStations
        } else if first.contains_key("Weather_Description") {
            TableKind::Weather
        } else {
            TableKind::Generic
        }
    }

    /// Display title for this table kind.
    pub fn title(&self) -> &'static str {
        match self {
            TableKind::Places => "Places to Visit",
            TableKind::Accommodations => "Accommodations Summary",
            TableKind::Hospitals => "Hospitals Summary",
            TableKind::Restaurants => "Restaurants Summary",
            TableKind::PoliceStations => "Police Stations Summary",
            TableKind::Weather => "Weather Summary",
            TableKind::Generic => "Data Summary",
        }
    }
}
