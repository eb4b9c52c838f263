//! Snapshot → JSON.

use crate::{Error, Result, Snapshot};

pub(crate) fn to_json_pretty(snapshot: &Snapshot) -> Result<String> {
  serde_json::to_string_pretty(snapshot).map_err(Error::Encode)
}

#[cfg(test)]
mod tests {
  use chrono::{TimeZone, Utc};
  use ringback_core::Record;
  use serde_json::Value;

  use crate::{SNAPSHOT_VERSION, Snapshot, decode_snapshot};

  fn sample() -> Vec<Record> {
    let t0 = Utc.with_ymd_and_hms(2023, 11, 2, 8, 15, 0).unwrap();
    let t1 = Utc.timestamp_millis_opt(1_714_559_400_250).unwrap();
    vec![
      Record { id: "1".into(), name: "Cy".into(), created_at: t0, last_called_at: t1 },
      Record {
        id:             "a2a1c1de-6a4f-4d0e-9c55-0f5e2f3b9d11".into(),
        name:           "Dee".into(),
        created_at:     t0,
        last_called_at: t0,
      },
    ]
  }

  #[test]
  fn writes_version_timestamp_and_people() {
    let exported_at = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
    let json = Snapshot::new(sample(), exported_at).to_json().unwrap();
    let v: Value = serde_json::from_str(&json).unwrap();

    assert_eq!(v["version"], SNAPSHOT_VERSION);
    assert_eq!(v["exportedAt"], "2024-05-01T12:00:00Z");
    assert_eq!(v["people"].as_array().unwrap().len(), 2);
    assert_eq!(v["people"][0]["name"], "Cy");
    assert_eq!(v["people"][0]["createdAt"], "2023-11-02T08:15:00Z");
  }

  #[test]
  fn export_then_decode_is_lossless() {
    let exported_at = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
    let later = Utc.with_ymd_and_hms(2030, 1, 1, 0, 0, 0).unwrap();
    let json = Snapshot::new(sample(), exported_at).to_json().unwrap();

    let decoded = decode_snapshot(&json, later).unwrap();
    assert_eq!(decoded.records, sample());
    assert!(decoded.skipped.is_empty());
    assert_eq!(decoded.version, Some(1));
  }
}
