//! The result of station resolution: one station per airport code, plus the
//! ordered mapping handed to the download loop.

use std::fmt;

/// A catalog station chosen for an airport code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedStation {
    pub icao: String,
    /// 6-digit zero-padded USAF identifier.
    pub usaf: String,
    /// 5-digit zero-padded WBAN identifier.
    pub wban: String,
    /// `usaf` followed by `wban` with no separator, as used in archive file names.
    pub station_id: String,
    pub name: String,
    pub begin: String,
    pub end: String,
}

impl ResolvedStation {
    pub fn new(icao: &str, usaf: String, wban: String, name: &str, begin: &str, end: &str) -> Self {
        let station_id = format!("{}{}", usaf, wban);
        Self {
            icao: icao.to_string(),
            usaf,
            wban,
            station_id,
            name: name.to_string(),
            begin: begin.to_string(),
            end: end.to_string(),
        }
    }

    pub fn is_active(&self) -> bool {
        self.end.trim().is_empty()
    }
}

impl fmt::Display for ResolvedStation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let end = if self.is_active() { "active" } else { &self.end };
        write!(
            f,
            "{}  ({})  [{}..{}]",
            self.station_id, self.name, self.begin, end
        )
    }
}

/// Airport code to [`ResolvedStation`], in the order the codes were resolved.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StationMapping {
    stations: Vec<ResolvedStation>,
}

impl StationMapping {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a station. A second station for an already mapped code is ignored
    /// and `false` is returned.
    pub fn insert(&mut self, station: ResolvedStation) -> bool {
        if self.get(&station.icao).is_some() {
            return false;
        }
        self.stations.push(station);
        true
    }

    pub fn get(&self, icao: &str) -> Option<&ResolvedStation> {
        self.stations.iter().find(|s| s.icao == icao)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ResolvedStation> {
        self.stations.iter()
    }

    pub fn len(&self) -> usize {
        self.stations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stations.is_empty()
    }
}

impl<'a> IntoIterator for &'a StationMapping {
    type Item = &'a ResolvedStation;
    type IntoIter = std::slice::Iter<'a, ResolvedStation>;

    fn into_iter(self) -> Self::IntoIter {
        self.stations.iter()
    }
}
