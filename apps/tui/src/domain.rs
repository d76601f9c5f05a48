use serde::{Deserialize, Deserializer, Serialize};

/// A point on the globe in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinate {
    pub const ORIGIN: Self = Self { lat: 0.0, lng: 0.0 };

    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Linear interpolation in lat/lng space, which is a straight line on the
    /// equirectangular map.
    pub fn lerp(self, other: Self, t: f64) -> Self {
        Self {
            lat: (other.lat - self.lat).mul_add(t, self.lat),
            lng: (other.lng - self.lng).mul_add(t, self.lng),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct City {
    pub name: &'static str,
    pub lat: f64,
    pub lng: f64,
}

impl City {
    pub const fn coordinate(&self) -> Coordinate {
        Coordinate::new(self.lat, self.lng)
    }
}

const fn city(name: &'static str, lat: f64, lng: f64) -> City {
    City { name, lat, lng }
}

/// Olympic host cities shown on the globe.
pub const HOST_CITIES: [City; 22] = [
    city("Athens", 37.9838, 23.7275),
    city("Paris", 48.8566, 2.3522),
    city("London", 51.5074, -0.1278),
    city("Stockholm", 59.3293, 18.0686),
    city("Amsterdam", 52.3676, 4.9041),
    city("Antwerp", 51.2194, 4.4025),
    city("Helsinki", 60.1695, 24.9354),
    city("Melbourne", -37.8136, 144.9631),
    city("Rome", 41.9028, 12.4964),
    city("Tokyo", 35.6895, 139.6917),
    city("Munich", 48.1351, 11.582),
    city("Montreal", 45.5017, -73.5673),
    city("Moscow", 55.7558, 37.6173),
    city("Los Angeles", 34.0522, -118.2437),
    city("Seoul", 37.5665, 126.978),
    city("Barcelona", 41.3851, 2.1734),
    city("Atlanta", 33.749, -84.388),
    city("Sydney", -33.8688, 151.2093),
    city("Beijing", 39.9042, 116.4074),
    city("Rio", -22.9068, -43.1729),
    city("Mexico", 19.4326, -99.1332),
    city("Berlin", 52.52, 13.405),
];

pub fn find_city(name: &str) -> Option<&'static City> {
    HOST_CITIES
        .iter()
        .find(|city| city.name.eq_ignore_ascii_case(name.trim()))
}

pub fn city_index(name: &str) -> Option<usize> {
    HOST_CITIES.iter().position(|city| city.name == name)
}

/// An athlete record as served by the athlete service. Only the name is ever
/// reshaped, and only for display.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Athlete {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub id: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub nationality: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub medal: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub sport: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub year: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub event: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub gender: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub result: String,
    /// Host city of the games, when the service includes it.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub location: String,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MedalFilter {
    #[default]
    All,
    Gold,
    Silver,
    Bronze,
}

impl MedalFilter {
    pub const ALL: [Self; 4] = [Self::All, Self::Gold, Self::Silver, Self::Bronze];

    /// Code sent to the athlete service.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Gold => "G",
            Self::Silver => "S",
            Self::Bronze => "B",
        }
    }

    pub const fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Self::All),
            1 => Some(Self::Gold),
            2 => Some(Self::Silver),
            3 => Some(Self::Bronze),
            _ => None,
        }
    }

    pub const fn index(self) -> usize {
        match self {
            Self::All => 0,
            Self::Gold => 1,
            Self::Silver => 2,
            Self::Bronze => 3,
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "all" => Some(Self::All),
            "g" | "gold" => Some(Self::Gold),
            "s" | "silver" => Some(Self::Silver),
            "b" | "bronze" => Some(Self::Bronze),
            _ => None,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::All => "All Medals",
            Self::Gold => "Gold",
            Self::Silver => "Silver",
            Self::Bronze => "Bronze",
        }
    }

    pub const fn next(self) -> Self {
        match Self::from_index((self.index() + 1) % Self::ALL.len()) {
            Some(filter) => filter,
            None => Self::All,
        }
    }

    pub const fn prev(self) -> Self {
        match Self::from_index((self.index() + Self::ALL.len() - 1) % Self::ALL.len()) {
            Some(filter) => filter,
            None => Self::All,
        }
    }
}
