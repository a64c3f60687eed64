//! Column definitions for each record type

use serde_json::Value;

use super::Tabular;
use super::duration::format_lap_time;
use crate::client::{Circuit, CircuitLapSummary, Driver, DriverStanding, LapTime, Race};

fn opt<T: Into<Value>>(value: Option<T>) -> Value {
    value.map(Into::into).unwrap_or(Value::Null)
}

fn text(value: &Option<String>) -> Value {
    opt(value.clone())
}

impl Tabular for Circuit {
    const COLUMNS: &'static [&'static str] = &[
        "circuitId",
        "circuitRef",
        "name",
        "location",
        "country",
        "lat",
        "lng",
        "alt",
        "url",
    ];

    fn cell(&self, column: &str) -> Value {
        match column {
            "circuitId" => self.circuit_id.into(),
            "circuitRef" => text(&self.circuit_ref),
            "name" => self.name.clone().into(),
            "location" => text(&self.location),
            "country" => text(&self.country),
            "lat" => opt(self.lat),
            "lng" => opt(self.lng),
            "alt" => opt(self.alt),
            "url" => text(&self.url),
            _ => Value::Null,
        }
    }
}

impl Tabular for Driver {
    const COLUMNS: &'static [&'static str] = &[
        "driverId",
        "driverRef",
        "code",
        "name",
        "forename",
        "surname",
        "dob",
        "nationality",
        "url",
    ];

    fn cell(&self, column: &str) -> Value {
        match column {
            "driverId" => self.driver_id.into(),
            "driverRef" => text(&self.driver_ref),
            "code" => text(&self.code),
            "name" => self.full_name().into(),
            "forename" => self.forename.clone().into(),
            "surname" => self.surname.clone().into(),
            "dob" => text(&self.dob),
            "nationality" => text(&self.nationality),
            "url" => text(&self.url),
            _ => Value::Null,
        }
    }
}

impl Tabular for DriverStanding {
    const COLUMNS: &'static [&'static str] = &[
        "driverStandingsId",
        "raceId",
        "driverId",
        "race",
        "driver",
        "points",
        "position",
        "wins",
        "year",
    ];

    fn cell(&self, column: &str) -> Value {
        match column {
            "driverStandingsId" => opt(self.driver_standings_id),
            "raceId" => self.race_id.into(),
            "driverId" => self.driver_id.into(),
            "race" => opt(self.race.as_ref().map(Race::label)),
            "driver" => opt(self.driver.as_ref().map(Driver::full_name)),
            "points" => self.points.into(),
            "position" => opt(self.position),
            "wins" => self.wins.into(),
            "year" => opt(self.race.as_ref().map(|r| r.year)),
            _ => Value::Null,
        }
    }
}

impl Tabular for Race {
    const COLUMNS: &'static [&'static str] = &[
        "raceId",
        "year",
        "round",
        "circuitId",
        "name",
        "date",
        "time",
        "circuit",
        "location",
        "country",
    ];

    fn cell(&self, column: &str) -> Value {
        match column {
            "raceId" => self.race_id.into(),
            "year" => self.year.into(),
            "round" => self.round.into(),
            "circuitId" => opt(self.circuit_id),
            "name" => self.name.clone().into(),
            "date" => self.date_only().into(),
            "time" => text(&self.time),
            "circuit" => opt(self.circuit.as_ref().map(|c| c.name.clone())),
            "location" => opt(self.circuit.as_ref().and_then(|c| c.location.clone())),
            "country" => opt(self.circuit.as_ref().and_then(|c| c.country.clone())),
            _ => Value::Null,
        }
    }
}

impl Tabular for LapTime {
    const COLUMNS: &'static [&'static str] = &[
        "raceId",
        "driverId",
        "lap",
        "position",
        "time",
        "milliseconds",
        "formatted_time",
        "race",
        "race_year",
        "race_round",
        "circuit",
    ];

    fn cell(&self, column: &str) -> Value {
        let race = self.race.as_ref();
        match column {
            "raceId" => self.race_id.into(),
            "driverId" => self.driver_id.into(),
            "lap" => self.lap.into(),
            "position" => opt(self.position),
            "time" => self.time.clone().into(),
            "milliseconds" => self.milliseconds.into(),
            "formatted_time" => format_lap_time(self.milliseconds).into(),
            "race" => opt(race.map(|r| r.name.clone())),
            "race_year" => opt(race.map(|r| r.year)),
            "race_round" => opt(race.map(|r| r.round)),
            "circuit" => opt(race.and_then(|r| r.circuit.as_ref()).map(|c| c.name.clone())),
            _ => Value::Null,
        }
    }
}

impl Tabular for CircuitLapSummary {
    const COLUMNS: &'static [&'static str] =
        &["track", "location", "country", "meanTime", "fastestTime"];

    fn cell(&self, column: &str) -> Value {
        match column {
            "track" => self.circuit.name.clone().into(),
            "location" => text(&self.circuit.location),
            "country" => text(&self.circuit.country),
            "meanTime" => self.mean_time.clone().into(),
            "fastestTime" => self.fastest_time.clone().into(),
            _ => Value::Null,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::mock::fixtures::{circuit, driver, lap, race, standing, summary};
    use crate::transform::{ColumnSpec, flatten};
    use serde_json::json;

    fn british_race() -> Race {
        let silverstone = circuit(9, "Silverstone Circuit", "UK", 153.0);
        race(1110, 2023, "British Grand Prix", Some(silverstone))
    }

    #[test]
    fn test_lap_time_derived_columns() {
        let lap = lap(12, 65_432, Some(british_race()));

        assert_eq!(lap.cell("formatted_time"), json!("1:05.432"));
        assert_eq!(lap.cell("race_year"), json!(2023));
        assert_eq!(lap.cell("race_round"), json!(1));
        assert_eq!(lap.cell("circuit"), json!("Silverstone Circuit"));
    }

    #[test]
    fn test_lap_time_without_race_has_null_nested_cells() {
        let lap = lap(1, 80_000, None);
        assert_eq!(lap.cell("race_year"), Value::Null);
        assert_eq!(lap.cell("circuit"), Value::Null);
        assert_eq!(lap.cell("time"), json!("1:20.000"));
    }

    #[test]
    fn test_race_extracts_circuit_fields() {
        let race = british_race();

        let rows = flatten(
            &[race],
            &ColumnSpec::only(&["name", "date", "location", "circuit"]),
        )
        .unwrap();

        assert_eq!(
            serde_json::to_value(&rows[0]).unwrap(),
            json!({
                "name": "British Grand Prix",
                "date": "2023-07-09",
                "location": "Silverstone Circuit town",
                "circuit": "Silverstone Circuit",
            })
        );
    }

    #[test]
    fn test_standing_labels_driver_and_race() {
        let standing = standing(
            driver(1, "Lewis", "Hamilton"),
            race(1, 2019, "Abu Dhabi Grand Prix", None),
            413.0,
            11,
        );

        assert_eq!(standing.cell("driver"), json!("Lewis Hamilton"));
        assert_eq!(standing.cell("race"), json!("2019 Abu Dhabi Grand Prix"));
        assert_eq!(standing.cell("year"), json!(2019));
        assert_eq!(standing.cell("wins"), json!(11));
    }

    #[test]
    fn test_summary_track_column() {
        let monza = circuit(14, "Autodromo Nazionale di Monza", "Italy", 162.0);
        let summary = summary(monza, "1:24.500", "1:21.046");
        let spec = ColumnSpec::only(&["track", "meanTime", "fastestTime"]);
        let rows = flatten(&[summary], &spec).unwrap();

        assert_eq!(
            rows[0].columns().collect::<Vec<_>>(),
            vec!["track", "meanTime", "fastestTime"]
        );
        assert_eq!(rows[0].get("track"), Some(&json!("Autodromo Nazionale di Monza")));
    }

    #[test]
    fn test_every_declared_column_is_handled() {
        let british = british_race();
        let lap = lap(1, 90_000, Some(british.clone()));

        for column in LapTime::COLUMNS {
            assert_ne!(lap.cell(column), Value::Null, "lap column {}", column);
        }
        for column in ["raceId", "year", "round", "circuitId", "name", "date", "time", "circuit"] {
            assert_ne!(british.cell(column), Value::Null, "race column {}", column);
        }
    }
}
