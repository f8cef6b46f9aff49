use std::path::Path;

use serde::{Deserialize, Serialize};

use super::error::EventFileError;

/// Which calorimeter a tower reading came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Calorimeter {
    Ecal,
    Hcal,
}

/// One calorimeter tower reading as delivered by the upstream digitization
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TowerHit {
    pub detector: Calorimeter,
    pub ieta: i16,
    pub iphi: u16,
    pub energy: u16,
    pub fine_grain: bool,
}

/// One event's worth of tower readings, tagged with the identifiers that
/// label its link dump
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventRecord {
    pub run: u32,
    pub lumi: u32,
    pub event: u32,
    pub hits: Vec<TowerHit>,
}

/// Read a YAML event file: a list of [EventRecord]s.
///
/// This is the emulator's stand-in for the digi collections a host
/// framework would deliver per event.
pub fn read_event_file(path: &Path) -> Result<Vec<EventRecord>, EventFileError> {
    if !path.exists() {
        return Err(EventFileError::BadFilePath(path.to_path_buf()));
    }

    let yaml_str = std::fs::read_to_string(path)?;
    Ok(serde_yaml::from_str::<Vec<EventRecord>>(&yaml_str)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_event_records() {
        let yaml = "
- run: 201602
  lumi: 12
  event: 7
  hits:
    - detector: ecal
      ieta: 1
      iphi: 1
      energy: 10
      fine_grain: true
    - detector: hcal
      ieta: -20
      iphi: 54
      energy: 3
      fine_grain: false
- run: 201602
  lumi: 12
  event: 8
  hits: []
";
        let records: Vec<EventRecord> = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].event, 7);
        assert_eq!(records[0].hits.len(), 2);
        assert_eq!(records[0].hits[0].detector, Calorimeter::Ecal);
        assert_eq!(records[0].hits[1].ieta, -20);
        assert!(records[1].hits.is_empty());
    }
}
