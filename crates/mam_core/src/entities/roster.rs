//! Roster time-off entries.

use chrono::{Local, NaiveDate};
use serde_json::{json, Value};

use crate::catalog::{ROSTER_FIELD_MAPS, TIME_OFF_MAINTENANCE_CODE};
use crate::fieldmap::FieldMapError;

/// One scheduled time-off row, read-only.
#[derive(Debug, Clone)]
pub struct RosterTimeOff {
    jdict: Value,
}

impl RosterTimeOff {
    pub fn new(jdict: Value) -> Self {
        Self { jdict }
    }

    pub fn read(&self, name: &str) -> Result<Option<Value>, FieldMapError> {
        ROSTER_FIELD_MAPS.read(name, &self.jdict)
    }

    pub fn resource(&self) -> Option<String> {
        self.read_text("resource")
    }

    pub fn group(&self) -> Option<String> {
        self.read_text("group")
    }

    pub fn start(&self) -> Option<String> {
        self.read_text("start")
    }

    pub fn end(&self) -> Option<String> {
        self.read_text("end")
    }

    pub fn time_off_type(&self) -> Option<String> {
        self.read_text("time_off_type")
    }

    pub fn is_maintenance(&self) -> bool {
        self.read("time_off_type_no")
            .ok()
            .flatten()
            .and_then(|v| match v {
                Value::Number(n) => n.as_i64(),
                Value::String(s) => s.parse().ok(),
                _ => None,
            })
            == Some(TIME_OFF_MAINTENANCE_CODE)
    }

    fn read_text(&self, name: &str) -> Option<String> {
        self.read(name)
            .ok()
            .flatten()
            .and_then(|v| v.as_str().map(|s| s.to_string()))
    }
}

/// Registry query document for time-off rows in a date range. `None` means
/// today only; `maintenance_only` narrows to the maintenance type.
pub fn time_off_query(range: Option<(NaiveDate, NaiveDate)>, maintenance_only: bool) -> Value {
    let (begin, end) = match range {
        Some((begin, end)) => (begin, end),
        None => {
            let today = Local::now().date_naive();
            (today, today)
        }
    };
    let mut query = json!({
        "trx_begin_dt": {"$range": [
            begin.format("%Y-%m-%d").to_string(),
            end.format("%Y-%m-%d").to_string(),
        ]},
    });
    if maintenance_only {
        query["time_off_type_no"] = Value::String(TIME_OFF_MAINTENANCE_CODE.to_string());
    }
    query
}
