//! Docker Engine API request and response bodies.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
pub(crate) struct CreateContainerBody<'a> {
    pub image: &'a str,
    pub cmd: &'a [String],
    pub volumes: BTreeMap<&'a str, EmptyObject>,
    pub host_config: HostConfigBody,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
pub(crate) struct HostConfigBody {
    pub binds: Vec<String>,
}

/// Serializes as `{}`.
#[derive(Debug, Default, Serialize)]
pub(crate) struct EmptyObject {}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub(crate) struct CreateContainerResponse {
    pub id: String,
    #[serde(default)]
    pub warnings: Option<Vec<String>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub(crate) struct InspectResponse {
    pub id: String,
    #[serde(default)]
    pub network_settings: Option<NetworkSettings>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct NetworkSettings {
    #[serde(rename = "IPAddress", default)]
    pub ip_address: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ErrorBody {
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_body_shape() {
        let cmd = vec!["/home/sdp/docker_slave.py".to_string(), "lts".to_string()];
        let body = CreateContainerBody {
            image: "slave:latest",
            cmd: &cmd,
            volumes: BTreeMap::from([("/home/sdp/components/", EmptyObject::default())]),
            host_config: HostConfigBody {
                binds: vec!["/srv/components:/home/sdp/components/:rw".into()],
            },
        };

        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["Image"], "slave:latest");
        assert_eq!(json["Cmd"][1], "lts");
        assert_eq!(json["Volumes"]["/home/sdp/components/"], serde_json::json!({}));
        assert_eq!(
            json["HostConfig"]["Binds"][0],
            "/srv/components:/home/sdp/components/:rw"
        );
    }

    #[test]
    fn inspect_without_network_settings() {
        let resp: InspectResponse = serde_json::from_str(r#"{"Id":"abc"}"#).unwrap();
        assert_eq!(resp.id, "abc");
        assert!(resp.network_settings.is_none());

        let resp: InspectResponse =
            serde_json::from_str(r#"{"Id":"abc","NetworkSettings":{"IPAddress":"172.17.0.2","Ports":{}}}"#)
                .unwrap();
        assert_eq!(
            resp.network_settings.and_then(|n| n.ip_address).as_deref(),
            Some("172.17.0.2")
        );
    }

    #[test]
    fn create_response_with_null_warnings() {
        let resp: CreateContainerResponse =
            serde_json::from_str(r#"{"Id":"abc","Warnings":null}"#).unwrap();
        assert_eq!(resp.id, "abc");
        assert!(resp.warnings.is_none());
    }
}
