use chrono::{DateTime, SecondsFormat, Utc};
use cookie::{time::Duration, Cookie, SameSite};
use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};

pub const TERMS_COOKIE: &str = "termsAgreement";
/// Seconds the consent cookie stays alive. The signup-input step has to be
/// finished within this window.
pub const TERMS_COOKIE_MAX_AGE: i64 = 3600;

/// Everything `encodeURIComponent` leaves alone stays readable, the rest is escaped.
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// The user's answer on the terms page along with when they gave it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ConsentRecord {
    pub agree_terms: bool,
    pub agree_privacy: bool,
    #[serde(with = "iso_millis")]
    pub agree_time: DateTime<Utc>,
}

impl ConsentRecord {
    pub fn new(agree_terms: bool, agree_privacy: bool, agree_time: DateTime<Utc>) -> Self {
        Self {
            agree_terms,
            agree_privacy,
            agree_time,
        }
    }

    pub fn to_json(&self) -> AppResult<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// JSON, percent encoded so that `;`, `,`, quotes and spaces can't break the cookie.
    pub fn to_cookie_value(&self) -> AppResult<String> {
        let json = self.to_json()?;
        Ok(utf8_percent_encode(&json, COMPONENT).to_string())
    }

    pub fn from_cookie_value(value: &str) -> AppResult<Self> {
        let json = percent_decode_str(value).decode_utf8()?;
        Ok(serde_json::from_str(&json)?)
    }

    pub fn to_cookie(&self) -> AppResult<Cookie<'static>> {
        let value = self.to_cookie_value()?;
        Ok(Cookie::build((TERMS_COOKIE, value))
            .path("/")
            .max_age(Duration::seconds(TERMS_COOKIE_MAX_AGE))
            .same_site(SameSite::Lax)
            .build())
    }

    pub fn from_cookie(cookie: &Cookie<'_>) -> AppResult<Self> {
        if cookie.name() != TERMS_COOKIE {
            return Err(AppError::WrongCookie {
                expected: TERMS_COOKIE.to_string(),
                actual: cookie.name().to_string(),
            });
        }
        Self::from_cookie_value(cookie.value())
    }
}

/// `2024-05-01T09:30:00.123Z` on the way out, any RFC 3339 timestamp on the way in.
mod iso_millis {
    use chrono::{DateTime, Utc};
    use serde::{de::Error, Deserialize, Deserializer, Serializer};

    pub(super) fn serialize<S>(time: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&super::format_agree_time(time))
    }

    pub(super) fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        DateTime::parse_from_rfc3339(&value)
            .map(|time| time.with_timezone(&Utc))
            .map_err(D::Error::custom)
    }
}

/// Formats a timestamp the same way the cookie does.
pub fn format_agree_time(time: &DateTime<Utc>) -> String {
    time.to_rfc3339_opts(SecondsFormat::Millis, true)
}

#[cfg(test)]
mod test {
    use super::*;
    use chrono::TimeZone;

    fn fixed_time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, 9, 30, 0).unwrap()
            + chrono::Duration::milliseconds(123)
    }

    #[test]
    fn json_shape() {
        let record = ConsentRecord::new(true, false, fixed_time());
        assert_eq!(
            record.to_json().unwrap(),
            r#"{"agreeTerms":true,"agreePrivacy":false,"agreeTime":"2024-05-01T09:30:00.123Z"}"#
        );
    }

    #[test]
    fn value_matches_encode_uri_component() {
        let record = ConsentRecord::new(true, false, fixed_time());
        // encodeURIComponent(JSON.stringify(...)) in a browser
        assert_eq!(
            record.to_cookie_value().unwrap(),
            "%7B%22agreeTerms%22%3Atrue%2C%22agreePrivacy%22%3Afalse%2C%22agreeTime%22%3A%222024-05-01T09%3A30%3A00.123Z%22%7D"
        );
    }

    #[test]
    fn value_has_no_cookie_delimiters() {
        let value = ConsentRecord::new(false, true, fixed_time())
            .to_cookie_value()
            .unwrap();
        for c in [';', ',', '"', ' ', '=', '{', '}', ':'] {
            assert!(!value.contains(c), "{c} leaked into {value}");
        }
    }

    #[test]
    fn cookie_attributes() {
        let cookie = ConsentRecord::new(false, false, fixed_time())
            .to_cookie()
            .unwrap();
        assert_eq!(cookie.name(), "termsAgreement");
        assert_eq!(cookie.path(), Some("/"));
        assert_eq!(cookie.max_age(), Some(Duration::seconds(3600)));
        assert_eq!(cookie.same_site(), Some(SameSite::Lax));
        let header = cookie.to_string();
        assert!(header.contains("Path=/"));
        assert!(header.contains("Max-Age=3600"));
        assert!(header.contains("SameSite=Lax"));
    }

    #[test]
    fn cookie_decodes_to_the_same_record() {
        let record = ConsentRecord::new(true, true, fixed_time());
        let cookie = record.to_cookie().unwrap();
        assert_eq!(ConsentRecord::from_cookie(&cookie).unwrap(), record);
    }

    #[test]
    fn decoded_value_has_exactly_three_fields() {
        let value = ConsentRecord::new(true, false, fixed_time())
            .to_cookie_value()
            .unwrap();
        let json = percent_decode_str(&value).decode_utf8().unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
        let object = parsed.as_object().unwrap();
        let mut keys = object.keys().cloned().collect::<Vec<_>>();
        keys.sort();
        assert_eq!(keys, vec!["agreePrivacy", "agreeTerms", "agreeTime"]);
    }

    #[test]
    fn rejects_extra_and_missing_fields() {
        let extra = r#"{"agreeTerms":true,"agreePrivacy":true,"agreeTime":"2024-05-01T09:30:00.123Z","admin":true}"#;
        assert!(ConsentRecord::from_cookie_value(extra).is_err());
        let missing = r#"{"agreeTerms":true,"agreeTime":"2024-05-01T09:30:00.123Z"}"#;
        assert!(ConsentRecord::from_cookie_value(missing).is_err());
    }

    #[test]
    fn accepts_other_offsets() {
        let record = ConsentRecord::from_cookie_value(
            r#"{"agreeTerms":false,"agreePrivacy":true,"agreeTime":"2024-05-01T18:30:00.123+09:00"}"#,
        )
        .unwrap();
        assert_eq!(record.agree_time, fixed_time());
    }

    #[test]
    fn wrong_cookie_name() {
        let cookie = Cookie::new("theme_mode", "dark");
        assert_eq!(
            ConsentRecord::from_cookie(&cookie),
            Err(AppError::WrongCookie {
                expected: "termsAgreement".to_string(),
                actual: "theme_mode".to_string()
            })
        );
    }

    #[test]
    fn bad_utf8() {
        assert!(matches!(
            ConsentRecord::from_cookie_value("%FF%FE"),
            Err(AppError::Encoding(_))
        ));
    }
}
