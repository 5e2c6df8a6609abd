//! AWS Signature Version 4 signing
//!
//! Both AWS surfaces the gateway calls (Bedrock runtime, AppConfig Data)
//! accept the same signing scheme; only the service name in the credential
//! scope differs, so the signer takes it as a constructor argument.

use crate::config::AwsConfig;
use crate::utils::error::{GatewayError, Result};
use chrono::{DateTime, Utc};
use hmac::{Hmac, Mac};
use sha2::{Digest, Sha256};
use std::collections::HashMap;

type HmacSha256 = Hmac<Sha256>;

/// SigV4 request signer scoped to one AWS service
#[derive(Debug, Clone)]
pub struct SigV4Signer {
    access_key: String,
    secret_key: String,
    session_token: Option<String>,
    region: String,
    service: String,
}

impl SigV4Signer {
    /// Create a signer for the given service signing name
    pub fn new(aws: &AwsConfig, service: &str) -> Self {
        Self {
            access_key: aws.access_key_id.clone(),
            secret_key: aws.secret_access_key.clone(),
            session_token: aws.session_token.clone(),
            region: aws.region.clone(),
            service: service.to_string(),
        }
    }

    /// Sign an HTTP request, returning the full header set to send
    ///
    /// `headers` are the caller's own headers (content type and such); they
    /// participate in the signature and come back in the result alongside
    /// `host`, `x-amz-date`, the optional security token, and
    /// `Authorization`.
    pub fn sign_request(
        &self,
        method: &str,
        url: &str,
        headers: &HashMap<String, String>,
        body: &str,
        timestamp: DateTime<Utc>,
    ) -> Result<HashMap<String, String>> {
        let parsed_url = url::Url::parse(url)
            .map_err(|e| GatewayError::signing(format!("Invalid URL: {}", e)))?;
        let host = parsed_url
            .host_str()
            .ok_or_else(|| GatewayError::signing("Missing host in URL"))?;
        let path = parsed_url.path();
        let query = parsed_url.query().unwrap_or("");

        let amz_date = timestamp.format("%Y%m%dT%H%M%SZ").to_string();
        let date_stamp = timestamp.format("%Y%m%d").to_string();

        let mut canonical_headers = headers.clone();
        canonical_headers.insert("host".to_string(), host.to_string());
        canonical_headers.insert("x-amz-date".to_string(), amz_date.clone());
        if let Some(ref token) = self.session_token {
            canonical_headers.insert("x-amz-security-token".to_string(), token.clone());
        }

        let mut sorted_headers: Vec<_> = canonical_headers.iter().collect();
        sorted_headers.sort_by(|a, b| a.0.to_lowercase().cmp(&b.0.to_lowercase()));

        let canonical_headers_str = sorted_headers
            .iter()
            .map(|(k, v)| format!("{}:{}", k.to_lowercase(), v.trim()))
            .collect::<Vec<_>>()
            .join("\n");
        let signed_headers = sorted_headers
            .iter()
            .map(|(k, _)| k.to_lowercase())
            .collect::<Vec<_>>()
            .join(";");

        let payload_hash = hex::encode(Sha256::digest(body.as_bytes()));
        let canonical_request = format!(
            "{}\n{}\n{}\n{}\n\n{}\n{}",
            method.to_uppercase(),
            path,
            query,
            canonical_headers_str,
            signed_headers,
            payload_hash
        );

        let algorithm = "AWS4-HMAC-SHA256";
        let credential_scope = format!(
            "{}/{}/{}/aws4_request",
            date_stamp, self.region, self.service
        );
        let canonical_request_hash = hex::encode(Sha256::digest(canonical_request.as_bytes()));
        let string_to_sign = format!(
            "{}\n{}\n{}\n{}",
            algorithm, amz_date, credential_scope, canonical_request_hash
        );

        let signature = self.calculate_signature(&string_to_sign, &date_stamp)?;
        let authorization = format!(
            "{} Credential={}/{}, SignedHeaders={}, Signature={}",
            algorithm, self.access_key, credential_scope, signed_headers, signature
        );

        let mut final_headers = canonical_headers;
        final_headers.insert("Authorization".to_string(), authorization);
        Ok(final_headers)
    }

    /// Derive the signing key and sign: kDate -> kRegion -> kService -> kSigning
    fn calculate_signature(&self, string_to_sign: &str, date_stamp: &str) -> Result<String> {
        let k_date = hmac_sha256(
            format!("AWS4{}", self.secret_key).as_bytes(),
            date_stamp.as_bytes(),
        )?;
        let k_region = hmac_sha256(&k_date, self.region.as_bytes())?;
        let k_service = hmac_sha256(&k_region, self.service.as_bytes())?;
        let k_signing = hmac_sha256(&k_service, b"aws4_request")?;

        let signature = hmac_sha256(&k_signing, string_to_sign.as_bytes())?;
        Ok(hex::encode(signature))
    }
}

fn hmac_sha256(key: &[u8], data: &[u8]) -> Result<Vec<u8>> {
    let mut mac = HmacSha256::new_from_slice(key)
        .map_err(|e| GatewayError::signing(format!("HMAC key error: {}", e)))?;
    mac.update(data);
    Ok(mac.finalize().into_bytes().to_vec())
}
