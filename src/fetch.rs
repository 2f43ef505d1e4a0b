use futures::TryFutureExt;
use reqwest::header::{HeaderValue, ACCEPT};
use reqwest::Client;
use serde_json::Value;
use url::Url;

use crate::model::{FeatureCalculationInfo, Info, ValueCalculationInfo};
use crate::{Error, Result};

/// Default scheme of the info endpoints.
pub const DEFAULT_SCHEME: &str = "http";

/// Default path of the info endpoints.
pub const DEFAULT_INFO_PATH: &str = "/actuator/info";

/// The two discriminated infos.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Infos {
    pub fc_info: FeatureCalculationInfo,
    pub vc_info: ValueCalculationInfo,
}

impl Infos {
    /// Pick the feature-calculation and value-calculation info, in any order.
    pub fn discriminate<I>(infos: I) -> Result<Self>
    where
        I: IntoIterator<Item = Info>,
    {
        let mut fc_info = None;
        let mut vc_info = None;
        for info in infos {
            match info {
                Info::FeatureCalculation(info) if fc_info.is_none() => fc_info = Some(info),
                Info::ValueCalculation(info) if vc_info.is_none() => vc_info = Some(info),
                other => log::debug!("ignore info {:?}", other.application_name()),
            }
        }

        match (fc_info, vc_info) {
            (Some(fc_info), Some(vc_info)) => Ok(Self { fc_info, vc_info }),
            _ => Err(Error::InfosNotFound),
        }
    }
}

/// Builder for [`Fetcher`].
#[derive(Debug, Default)]
pub struct FetcherBuilder {
    scheme: Option<String>,
    info_path: Option<String>,
    client: Option<Client>,
}

impl FetcherBuilder {
    /// Specify scheme of the info URLs. (Default: http)
    pub fn scheme<S: Into<String>>(&mut self, value: S) -> &mut Self {
        self.scheme = Some(value.into());
        self
    }

    /// Specify path of the info URLs. (Default: /actuator/info)
    pub fn info_path<S: Into<String>>(&mut self, value: S) -> &mut Self {
        self.info_path = Some(value.into());
        self
    }

    /// Specify HTTP client. (Default: `Client::new()`)
    pub fn client(&mut self, value: Client) -> &mut Self {
        self.client = Some(value);
        self
    }

    pub fn build(&mut self) -> Fetcher {
        Fetcher {
            scheme: self
                .scheme
                .take()
                .unwrap_or_else(|| DEFAULT_SCHEME.to_string()),
            info_path: self
                .info_path
                .take()
                .unwrap_or_else(|| DEFAULT_INFO_PATH.to_string()),
            client: self.client.take().unwrap_or_default(),
        }
    }
}

/// Fetch `/actuator/info` documents.
#[derive(Debug, Clone)]
pub struct Fetcher {
    scheme: String,
    info_path: String,
    client: Client,
}

impl Fetcher {
    /// Construct [`FetcherBuilder`] instance.
    pub fn builder() -> FetcherBuilder {
        Default::default()
    }

    /// Info URL of `host_and_port`. e.g. `prod-value-calculation:8081`
    pub fn info_url(&self, host_and_port: &str) -> Result<Url> {
        Ok(Url::parse(&format!(
            "{}://{}{}",
            self.scheme, host_and_port, self.info_path
        ))?)
    }

    /// GET one info document.
    pub async fn fetch_info(&self, url: Url) -> Result<Info> {
        log::debug!("GET {}", url);
        let response = self
            .client
            .get(url.clone())
            .header(ACCEPT, HeaderValue::from_static("application/json"))
            .send()
            .await?
            .error_for_status()?;
        let body = response.bytes().await?;
        recv!(url, body.len(), String::from_utf8_lossy(&body));

        let json = serde_json::from_slice::<Value>(&body)?;
        let info = Info::from_value(json)?;
        log::debug!("{} is {:?}", url, info.application_name());
        Ok(info)
    }

    /// GET both info documents concurrently and discriminate them.
    pub async fn fetch_infos(&self, fc_info_url: Url, vc_info_url: Url) -> Result<Infos> {
        let fc = tokio::spawn({
            let fetcher = self.clone();
            async move { fetcher.fetch_info(fc_info_url).await }
        });
        let vc = tokio::spawn({
            let fetcher = self.clone();
            async move { fetcher.fetch_info(vc_info_url).await }
        });

        let (fc, vc) = tokio::try_join!(fc.map_err(Error::from), vc.map_err(Error::from))?;
        Infos::discriminate(vec![fc?, vc?])
    }
}
