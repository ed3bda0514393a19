//! Wire format of the reservation endpoints.
use chrono::{NaiveDate, NaiveTime};
use roomservice_services::reservation::{CreateReservationRequest, Theme};
use roomservice_store::Reservation;
use serde::{Deserialize, Serialize};

/// `HH:MM` on the way out; `HH:MM` or `HH:MM:SS[.fff]` on the way in.
pub(crate) mod minute_time {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer};

    const FORMAT: &str = "%H:%M";

    pub fn serialize<S: Serializer>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&time.format(FORMAT))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveTime, D::Error> {
        let s = String::deserialize(deserializer)?;
        NaiveTime::parse_from_str(&s, FORMAT)
            .or_else(|_| NaiveTime::parse_from_str(&s, "%H:%M:%S%.f"))
            .map_err(serde::de::Error::custom)
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct ThemeBody {
    pub name: String,
    pub desc: String,
    pub price: i32,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct ReservationRequest {
    pub date: NaiveDate,
    #[serde(with = "minute_time")]
    pub time: NaiveTime,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub theme: Option<ThemeBody>,
}

impl From<ReservationRequest> for CreateReservationRequest {
    fn from(body: ReservationRequest) -> Self {
        CreateReservationRequest {
            date: body.date,
            time: body.time,
            name: body.name,
            theme: body.theme.map(|t| Theme {
                name: t.name,
                desc: t.desc,
                price: t.price,
            }),
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct ReservationResponse {
    pub id: i64,
    pub date: NaiveDate,
    #[serde(with = "minute_time")]
    pub time: NaiveTime,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub theme: Option<ThemeBody>,
}

impl From<Reservation> for ReservationResponse {
    fn from(r: Reservation) -> Self {
        let theme = match (r.theme_name, r.theme_desc, r.theme_price) {
            (Some(name), Some(desc), Some(price)) => Some(ThemeBody { name, desc, price }),
            _ => None,
        };

        ReservationResponse {
            id: r.id,
            date: r.date,
            time: r.time,
            name: r.name,
            theme,
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_request_accepts_minutes_and_seconds() {
        for time in ["13:00", "13:00:00", "13:00:00.000"] {
            let body: ReservationRequest = serde_json::from_value(json!({
                "date": "2023-01-01",
                "time": time,
                "name": "hi",
            }))
            .unwrap();

            assert_eq!(body.time, NaiveTime::from_hms_opt(13, 0, 0).unwrap());
            assert_eq!(body.theme, None);
        }
    }

    #[test]
    fn test_request_rejects_bad_time() {
        let result = serde_json::from_value::<ReservationRequest>(json!({
            "date": "2023-01-01",
            "time": "1pm",
            "name": "hi",
        }));

        assert!(result.is_err());
    }

    #[test]
    fn test_response_shape() {
        let response = ReservationResponse::from(Reservation {
            id: 1,
            date: NaiveDate::from_ymd_opt(2023, 1, 1).unwrap(),
            time: NaiveTime::from_hms_opt(13, 0, 0).unwrap(),
            name: "hi".to_string(),
            theme_name: Some("horror".to_string()),
            theme_desc: Some("lights off".to_string()),
            theme_price: Some(29000),
        });

        assert_eq!(
            serde_json::to_value(response).unwrap(),
            json!({
                "id": 1,
                "date": "2023-01-01",
                "time": "13:00",
                "name": "hi",
                "theme": {"name": "horror", "desc": "lights off", "price": 29000},
            })
        );
    }
}
