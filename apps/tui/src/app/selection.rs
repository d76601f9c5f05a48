use crate::domain::Coordinate;

/// Which city panel is open, plus where the last flight landed.
///
/// `last_coordinate` survives closing the panel: it is the start point of the
/// next flight. Only the flight scheduler writes it.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Selection {
    open_city: Option<String>,
    last_coordinate: Coordinate,
}

impl Selection {
    pub fn select(&mut self, city_name: &str) {
        self.open_city = Some(city_name.to_string());
    }

    /// Forget the open city. The caller is responsible for dropping the query
    /// context along with it (see `App::close_panel`).
    pub fn clear(&mut self) {
        self.open_city = None;
    }

    pub fn open_city(&self) -> Option<&str> {
        self.open_city.as_deref()
    }

    pub const fn is_open(&self) -> bool {
        self.open_city.is_some()
    }

    pub const fn last_coordinate(&self) -> Coordinate {
        self.last_coordinate
    }

    pub(crate) fn set_last_coordinate(&mut self, coordinate: Coordinate) {
        self.last_coordinate = coordinate;
    }
}
