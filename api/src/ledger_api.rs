//! Defines the trait for a ledger node and its HTTP implementation.

use crate::ApiError;
use crate::LedgerBlock;
use crate::TransactionRequest;

/// The five calls a ledger node answers.
///
/// Every call is a single request/response.  Nothing here retries, polls or
/// caches; that is left to the caller.
#[allow(async_fn_in_trait)]
pub trait LedgerApi {
    /// `GET /blocks`: the whole chain, oldest block first.
    async fn blocks(&self) -> Result<Vec<LedgerBlock>, ApiError>;

    /// `GET /balance/{address}`
    async fn balance(&self, address: &str) -> Result<u64, ApiError>;

    /// `GET /chain/valid`
    async fn chain_valid(&self) -> Result<bool, ApiError>;

    /// `POST /transaction`: queues a transaction for the next block.
    ///
    /// Returns the node's acknowledgement text, which may be empty.
    async fn submit_transaction(&self, request: &TransactionRequest) -> Result<String, ApiError>;

    /// `POST /mine`: mines pending transactions into a new block.
    async fn mine(&self) -> Result<Option<LedgerBlock>, ApiError>;
}

/// Talks to a ledger node over HTTP with reqwest.
pub mod http {
    use super::*;
    use crate::envelope;
    use crate::envelope::ApiResponse;
    use crate::prefs::client_prefs::ClientPrefs;
    use reqwest::Url;
    use serde::de::DeserializeOwned;

    /// An implementation of the `LedgerApi` trait for a node reachable over HTTP.
    #[derive(Clone, Debug)]
    pub struct HttpLedgerApi {
        client: reqwest::Client,
        base: Url,
    }

    impl HttpLedgerApi {
        pub fn new(base_url: &str) -> Result<Self, ApiError> {
            let base =
                Url::parse(base_url).map_err(|e| ApiError::InvalidBaseUrl(format!("{base_url}: {e}")))?;
            if base.cannot_be_a_base() {
                return Err(ApiError::InvalidBaseUrl(base_url.to_string()));
            }
            Ok(Self {
                client: reqwest::Client::new(),
                base,
            })
        }

        pub fn from_prefs(prefs: &ClientPrefs) -> Result<Self, ApiError> {
            Self::new(prefs.api_base())
        }

        pub fn base_url(&self) -> &Url {
            &self.base
        }

        /// Appends `segments` to the base path, percent-encoding each one.
        pub fn endpoint(&self, segments: &[&str]) -> Result<Url, ApiError> {
            let mut url = self.base.clone();
            url.path_segments_mut()
                .map_err(|_| ApiError::InvalidBaseUrl(self.base.to_string()))?
                .pop_if_empty()
                .extend(segments);
            Ok(url)
        }

        async fn get<T: DeserializeOwned>(&self, segments: &[&str]) -> Result<ApiResponse<T>, ApiError> {
            let resp = self.client.get(self.endpoint(segments)?).send().await?;
            Self::read(resp).await
        }

        async fn post<T: DeserializeOwned>(
            &self,
            segments: &[&str],
            body: Option<&TransactionRequest>,
        ) -> Result<ApiResponse<T>, ApiError> {
            let mut req = self.client.post(self.endpoint(segments)?);
            if let Some(body) = body {
                req = req.json(body);
            }
            Self::read(req.send().await?).await
        }

        async fn read<T: DeserializeOwned>(resp: reqwest::Response) -> Result<ApiResponse<T>, ApiError> {
            let status = resp.status().as_u16();
            let body = resp.bytes().await?;
            envelope::decode(status, &body)
        }
    }

    impl LedgerApi for HttpLedgerApi {
        async fn blocks(&self) -> Result<Vec<LedgerBlock>, ApiError> {
            self.get(&["blocks"]).await?.into_data()
        }

        async fn balance(&self, address: &str) -> Result<u64, ApiError> {
            self.get(&["balance", address]).await?.into_data()
        }

        async fn chain_valid(&self) -> Result<bool, ApiError> {
            self.get(&["chain", "valid"]).await?.into_data()
        }

        async fn submit_transaction(&self, request: &TransactionRequest) -> Result<String, ApiError> {
            let ack: Option<String> = self
                .post(&["transaction"], Some(request))
                .await?
                .into_result()?;
            Ok(ack.unwrap_or_default())
        }

        async fn mine(&self) -> Result<Option<LedgerBlock>, ApiError> {
            self.post(&["mine"], None).await?.into_result()
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn endpoints_join_under_the_base_path() {
            let api = HttpLedgerApi::new("http://localhost:3000").unwrap();
            assert_eq!(
                api.endpoint(&["chain", "valid"]).unwrap().as_str(),
                "http://localhost:3000/chain/valid"
            );

            let api = HttpLedgerApi::new("https://example.org/ledger/").unwrap();
            assert_eq!(
                api.endpoint(&["blocks"]).unwrap().as_str(),
                "https://example.org/ledger/blocks"
            );
        }

        #[test]
        fn addresses_are_encoded_as_a_single_segment() {
            let api = HttpLedgerApi::new("http://localhost:3000").unwrap();
            assert_eq!(
                api.endpoint(&["balance", "user 1/x"]).unwrap().as_str(),
                "http://localhost:3000/balance/user%201%2Fx"
            );
        }

        #[test]
        fn bad_base_urls_are_rejected() {
            assert!(matches!(
                HttpLedgerApi::new("localhost:3000 nope"),
                Err(ApiError::InvalidBaseUrl(_))
            ));
            assert!(matches!(
                HttpLedgerApi::new("mailto:ops@example.org"),
                Err(ApiError::InvalidBaseUrl(_))
            ));
        }

        #[test]
        fn built_from_prefs() {
            let prefs = ClientPrefs::new("http://10.0.0.2:3000", "user-2");
            let api = HttpLedgerApi::from_prefs(&prefs).unwrap();
            assert_eq!(api.base_url().as_str(), "http://10.0.0.2:3000/");
        }

        #[tokio::test]
        async fn unreachable_node_is_a_transport_failure() {
            // Port 9 (discard) is not expected to run an HTTP server.
            let api = HttpLedgerApi::new("http://127.0.0.1:9").unwrap();
            let err = api.chain_valid().await.unwrap_err();
            assert!(err.is_transport());
        }
    }
}
