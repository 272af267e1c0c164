//! Configuration and validation for the HSS protocol.
//!
//! This module groups the protocol-level knobs (number of servers, number of
//! multiplied inputs) together with the PRS parameters they are used with.

use crate::proto::prs::HssConfig as HssConfigProto;
use crate::prs::PrsParameters;
use crate::{Error, ParametersError, Result};
use prost::Message;
use prs_traits::Serialize;
use std::sync::Arc;

/// Minimum number of evaluator servers.
pub const MIN_SERVERS: usize = 2;

/// Number of inputs of the trilinear product.
pub const TRILINEAR_ARITY: usize = 3;

/// Validates the number of evaluator servers.
pub fn validate_server_count(num_servers: usize) -> Result<()> {
    if num_servers < MIN_SERVERS {
        return Err(ParametersError::InvalidServerCount(num_servers, MIN_SERVERS).into());
    }
    Ok(())
}

/// Validates the number of multiplied inputs.
pub fn validate_arity(arity: usize) -> Result<()> {
    if arity == 0 {
        return Err(ParametersError::InvalidArity(arity, 1).into());
    }
    Ok(())
}

/// Validates a server index against the number of servers.
pub fn validate_server_index(index: usize, num_servers: usize) -> Result<()> {
    if index >= num_servers {
        return Err(Error::InvalidServerIndex(index, num_servers));
    }
    Ok(())
}

/// Validates all HSS configuration parameters.
pub fn validate_all_params(num_servers: usize, arity: usize) -> Result<()> {
    validate_server_count(num_servers)?;
    validate_arity(arity)?;
    Ok(())
}

/// Protocol configuration: how many servers evaluate a product of how many
/// inputs, under which PRS parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HssConfig {
    num_servers: usize,
    arity: usize,
    params: Arc<PrsParameters>,
}

impl HssConfig {
    /// Create a validated configuration.
    pub fn new(num_servers: usize, arity: usize, params: &Arc<PrsParameters>) -> Result<Self> {
        validate_all_params(num_servers, arity)?;
        Ok(Self {
            num_servers,
            arity,
            params: params.clone(),
        })
    }

    /// Configuration for the product of three inputs.
    pub fn trilinear(num_servers: usize, params: &Arc<PrsParameters>) -> Result<Self> {
        Self::new(num_servers, TRILINEAR_ARITY, params)
    }

    /// Returns the number of servers.
    pub const fn num_servers(&self) -> usize {
        self.num_servers
    }

    /// Returns the number of multiplied inputs.
    pub const fn arity(&self) -> usize {
        self.arity
    }

    /// Returns the PRS parameters.
    pub fn parameters(&self) -> &Arc<PrsParameters> {
        &self.params
    }

    /// Deserialize a configuration, validating it as [`HssConfig::new`] would.
    pub fn try_deserialize(bytes: &[u8]) -> Result<Self> {
        let proto: HssConfigProto =
            Message::decode(bytes).map_err(|_| Error::SerializationError)?;
        let params = proto.params.ok_or(Error::SerializationError)?;
        let params = PrsParameters::try_deserialize(&params.encode_to_vec())?;
        Self::new(
            proto.num_servers as usize,
            proto.arity as usize,
            &Arc::new(params),
        )
    }
}

impl From<&HssConfig> for HssConfigProto {
    fn from(config: &HssConfig) -> Self {
        HssConfigProto {
            num_servers: config.num_servers as u32,
            arity: config.arity as u32,
            params: Some(config.params.as_ref().into()),
        }
    }
}

impl Serialize for HssConfig {
    fn to_bytes(&self) -> Vec<u8> {
        HssConfigProto::from(self).encode_to_vec()
    }
}
