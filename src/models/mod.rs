/// Forum items: stories, comments, jobs, polls and poll options.
pub mod item;
/// The story lists.
pub mod stories;
/// User profiles.
pub mod user;

use chrono::{DateTime, TimeZone, Utc};

pub(crate) fn epoch() -> DateTime<Utc> {
    DateTime::<Utc>::from(std::time::UNIX_EPOCH)
}

pub(crate) fn de_timestamp<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let secs = <Option<i64> as serde::Deserialize>::deserialize(deserializer)?.unwrap_or_default();
    Utc.timestamp_opt(secs, 0)
        .single()
        .ok_or_else(|| serde::de::Error::custom(format!("invalid UNIX timestamp: {secs}")))
}

pub(crate) fn ser_timestamp<S>(time: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.serialize_i64(time.timestamp())
}

pub(crate) mod macros {
    macro_rules! str_opt_ref {
        ($x:expr) => {
            $x.as_ref().map(|x| x.as_ref())
        };
    }

    pub(crate) use str_opt_ref;
}

#[cfg(test)]
mod tests {
    use super::{de_timestamp, epoch, ser_timestamp};
    use chrono::{DateTime, Utc};
    use serde::{Deserialize, Serialize};

    #[derive(Serialize, Deserialize)]
    struct Stamp {
        #[serde(
            default = "epoch",
            serialize_with = "ser_timestamp",
            deserialize_with = "de_timestamp"
        )]
        time: DateTime<Utc>,
    }

    #[test]
    fn reads_unix_seconds() {
        let stamp: Stamp = serde_json::from_str(r#"{"time": 1175714200}"#).unwrap();
        assert_eq!(stamp.time.to_rfc3339(), "2007-04-04T19:16:40+00:00");
    }

    #[test]
    fn writes_unix_seconds() {
        let stamp: Stamp = serde_json::from_str(r#"{"time": 1175714200}"#).unwrap();
        assert_eq!(serde_json::to_string(&stamp).unwrap(), r#"{"time":1175714200}"#);
    }

    #[test]
    fn null_and_missing_are_epoch() {
        let stamp: Stamp = serde_json::from_str(r#"{"time": null}"#).unwrap();
        assert_eq!(stamp.time.timestamp(), 0);
        let stamp: Stamp = serde_json::from_str("{}").unwrap();
        assert_eq!(stamp.time.timestamp(), 0);
    }

    #[test]
    fn rejects_out_of_range() {
        let stamp = serde_json::from_str::<Stamp>(r#"{"time": 9223372036854775807}"#);
        assert!(stamp.is_err());
    }
}
