use log::{debug, trace};
use reqwest::header::CONTENT_TYPE;
use reqwest::Method;
use serde::{Deserialize, Serialize};
use std::net::{IpAddr, SocketAddr};

use crate::adjust::{Adjustment, Field};
use crate::config::Config;
use crate::error::{ElgatoError, Result};

/// Body of every `lights` and `accessory-info` exchange, and of PUT requests.
#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Status {
    #[serde(default)]
    pub number_of_lights: i64,
    #[serde(default)]
    pub lights: Vec<Light>,

    #[serde(flatten)]
    pub info: AccessoryInfo,
}

/// Zero brightness or temperature is left out of the body so the device keeps
/// its current value for that attribute.
#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Light {
    #[serde(default)]
    pub on: i64,
    #[serde(default, skip_serializing_if = "is_zero")]
    pub brightness: i64,
    #[serde(default, skip_serializing_if = "is_zero")]
    pub temperature: i64,
}

#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessoryInfo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hardware_board_type: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub firmware_build_number: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub firmware_version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub serial_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub features: Option<Vec<String>>,
}

fn is_zero(v: &i64) -> bool {
    *v == 0
}

impl Status {
    /// A request addressing exactly one light.
    pub fn single(light: Light) -> Status {
        Status {
            number_of_lights: 1,
            lights: vec![light],
            info: Default::default(),
        }
    }

    pub fn first_light(&self) -> Result<&Light> {
        self.lights.first().ok_or(ElgatoError::NoLights)
    }
}

impl Light {
    fn field(&self, field: Field) -> i64 {
        match field {
            Field::Brightness => self.brightness,
            Field::Temperature => self.temperature,
        }
    }
}

/// Talks to Key Lights by IP. One client serves every light of an
/// invocation; requests are issued one at a time.
#[derive(Debug)]
pub struct KeyLightClient {
    port: u16,
    adjustment: Adjustment,

    client: reqwest::Client,
}

impl KeyLightClient {
    pub fn new(config: &Config) -> Result<KeyLightClient> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(ElgatoError::RequestBuildError)?;

        Ok(KeyLightClient {
            port: config.port,
            adjustment: Adjustment::default(),

            client,
        })
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub fn adjustment(&self) -> Adjustment {
        self.adjustment
    }

    pub fn set_adjustment(&mut self, adjustment: Adjustment) {
        self.adjustment = adjustment;
    }

    /// Applies a `--value` string. Empty input keeps the current adjustment.
    pub fn set_value(&mut self, input: &str) -> Result<()> {
        if let Some(adjustment) = Adjustment::parse(input)? {
            self.adjustment = adjustment;
        }
        Ok(())
    }

    pub fn url(&self, ip: IpAddr, endpoint: &str) -> String {
        format!(
            "http://{}/elgato/{}",
            SocketAddr::new(ip, self.port),
            endpoint
        )
    }

    pub async fn dispatch(
        &self,
        ip: IpAddr,
        payload: Option<&Status>,
        endpoint: &str,
        method: Method,
    ) -> Result<Status> {
        let body = payload
            .map(|p| serde_json::to_vec(p))
            .transpose()
            .map_err(ElgatoError::EncodeError)?;

        let url = self.url(ip, endpoint);
        debug!(
            "{} {} {}",
            method,
            url,
            body.as_deref()
                .map(String::from_utf8_lossy)
                .unwrap_or_default()
        );

        let mut builder = self
            .client
            .request(method, &url)
            .header(CONTENT_TYPE, "application/json");
        if let Some(body) = body {
            builder = builder.body(body);
        }
        let request = builder.build().map_err(ElgatoError::RequestBuildError)?;

        let resp = self.client.execute(request).await?;
        let bytes = resp.bytes().await.map_err(ElgatoError::BodyReadError)?;
        trace!("{} answered {}", url, String::from_utf8_lossy(&bytes));

        serde_json::from_slice(&bytes).map_err(ElgatoError::DecodeError)
    }

    pub async fn state(&self, ip: IpAddr) -> Result<Status> {
        self.dispatch(ip, None, "lights", Method::GET).await
    }

    pub async fn info(&self, ip: IpAddr) -> Result<Status> {
        self.dispatch(ip, None, "accessory-info", Method::GET).await
    }

    pub async fn status(&self, ip: IpAddr) -> Result<i64> {
        Ok(self.state(ip).await?.first_light()?.on)
    }

    pub async fn brightness(&self, ip: IpAddr) -> Result<i64> {
        Ok(self.state(ip).await?.first_light()?.brightness)
    }

    pub async fn temperature(&self, ip: IpAddr) -> Result<i64> {
        Ok(self.state(ip).await?.first_light()?.temperature)
    }

    async fn put(&self, ip: IpAddr, light: Light) -> Result<Status> {
        let request = Status::single(light);
        self.dispatch(ip, Some(&request), "lights", Method::PUT)
            .await
    }

    pub async fn set_power(&self, ip: IpAddr, on: bool) -> Result<Status> {
        self.put(
            ip,
            Light {
                on: on as i64,
                ..Default::default()
            },
        )
        .await
    }

    pub async fn set_on(&self, ip: IpAddr) -> Result<Status> {
        self.set_power(ip, true).await
    }

    pub async fn set_off(&self, ip: IpAddr) -> Result<Status> {
        self.set_power(ip, false).await
    }

    pub async fn toggle(&self, ip: IpAddr) -> Result<Status> {
        match self.status(ip).await? {
            0 => self.set_power(ip, true).await,
            1 => self.set_power(ip, false).await,
            other => Err(ElgatoError::InvalidState(other)),
        }
    }

    pub async fn set_brightness(&self, ip: IpAddr) -> Result<Status> {
        self.set_field(ip, Field::Brightness).await
    }

    pub async fn set_temperature(&self, ip: IpAddr) -> Result<Status> {
        self.set_field(ip, Field::Temperature).await
    }

    /// Resolves the session adjustment for `field` on this light, checks the
    /// bounds and turns the light on with the new value.
    async fn set_field(&self, ip: IpAddr, field: Field) -> Result<Status> {
        let current = if self.adjustment.is_relative() {
            self.state(ip).await?.first_light()?.field(field)
        } else {
            0
        };
        let value = field.check(self.adjustment.apply(current))?;
        debug!("{}: {} {} -> {}", ip, field, current, value);

        let mut light = Light {
            on: 1,
            ..Default::default()
        };
        match field {
            Field::Brightness => light.brightness = value,
            Field::Temperature => light.temperature = value,
        }

        self.put(ip, light).await
    }
}
