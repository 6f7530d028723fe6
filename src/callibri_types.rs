use serde::{Deserialize, Deserializer, Serialize};

/// A monitored line on the account, as listed by `get_sites`.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Site {
    #[serde(deserialize_with = "string_or_number")]
    pub site_id: String,
}

#[derive(Deserialize, Debug)]
pub struct SitesResponse {
    pub sites: Vec<Site>,
}

#[derive(Deserialize, Debug)]
pub struct SiteStatisticsResponse {
    pub channels_statistics: Vec<ChannelStatistics>,
}

impl SiteStatisticsResponse {
    /// Concatenate every channel's calls, keeping channel order and call order within a channel.
    pub fn into_calls(self) -> Vec<CallRecord> {
        self.channels_statistics
            .into_iter()
            .flat_map(|channel| channel.calls)
            .collect()
    }
}

#[derive(Deserialize, Debug)]
pub struct ChannelStatistics {
    #[serde(default)]
    pub calls: Vec<CallRecord>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct CallRecord {
    pub date: String,
    #[serde(default, deserialize_with = "nullable_string")]
    pub phone: String,
    #[serde(default, deserialize_with = "nullable_string")]
    pub status: String,
    #[serde(default, deserialize_with = "nullable_string")]
    pub comment: String,
    #[serde(default, deserialize_with = "nullable_string")]
    pub link_download: String,
    #[serde(default, deserialize_with = "nullable_string")]
    pub call_status: String,
    #[serde(default, deserialize_with = "nullable_string")]
    pub name: String,
    #[serde(default, deserialize_with = "nullable_bool")]
    pub is_lid: bool,
    #[serde(default, deserialize_with = "nullable_string")]
    pub region: String,
    #[serde(default, deserialize_with = "nullable_string")]
    pub accurately: String,
    #[serde(default, deserialize_with = "nullable_string")]
    pub responsible_manager: String,
    #[serde(default, deserialize_with = "nullable_string")]
    pub lid_catcher: String,
}

fn nullable_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

fn nullable_bool<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    Ok(Option::<bool>::deserialize(deserializer)?.unwrap_or_default())
}

// site ids come back as numbers on some accounts
fn string_or_number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Id {
        Text(String),
        Number(i64),
    }

    Ok(match Id::deserialize(deserializer)? {
        Id::Text(s) => s,
        Id::Number(n) => n.to_string(),
    })
}
