//! Typed-data (EIP-712) action descriptors returned by the protocol API.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};

use crate::TypedDataError;

const DOMAIN_TYPE: &str = "EIP712Domain";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypedDataDomain {
    pub name: String,
    pub version: String,
    pub chain_id: u64,
    pub verifying_contract: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypedDataField {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
}

impl TypedDataField {
    pub fn new(name: impl Into<String>, kind: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: kind.into(),
        }
    }

    /// Struct name referenced by this field, with array suffixes stripped.
    fn base_kind(&self) -> &str {
        self.kind.split('[').next().unwrap_or(&self.kind)
    }
}

/// The `{domain, types, value}` triple a wallet signs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypedData {
    pub domain: TypedDataDomain,
    pub types: BTreeMap<String, Vec<TypedDataField>>,
    pub value: Map<String, Value>,
}

impl TypedData {
    /// The single struct type not referenced by any other struct type.
    pub fn primary_type(&self) -> Result<&str, TypedDataError> {
        let referenced: Vec<&str> = self
            .types
            .values()
            .flatten()
            .map(TypedDataField::base_kind)
            .collect();

        let roots: Vec<&str> = self
            .types
            .keys()
            .map(String::as_str)
            .filter(|name| *name != DOMAIN_TYPE && !referenced.contains(name))
            .collect();

        match roots.as_slice() {
            [root] => Ok(*root),
            [] => Err(TypedDataError::NoPrimaryType),
            _ => Err(TypedDataError::AmbiguousPrimaryType(
                roots.iter().map(|r| r.to_string()).collect(),
            )),
        }
    }

    /// Full `eth_signTypedData_v4` document.
    ///
    /// Adds the `EIP712Domain` type and `primaryType`; domain, types and
    /// message are forwarded as received.
    pub fn to_eip712_json(&self) -> Result<Value, TypedDataError> {
        let primary_type = self.primary_type()?;

        let mut types = Map::new();
        types.insert(
            DOMAIN_TYPE.to_string(),
            json!([
                {"name": "name", "type": "string"},
                {"name": "version", "type": "string"},
                {"name": "chainId", "type": "uint256"},
                {"name": "verifyingContract", "type": "address"},
            ]),
        );
        for (name, fields) in &self.types {
            if name == DOMAIN_TYPE {
                continue;
            }
            types.insert(
                name.clone(),
                serde_json::to_value(fields).map_err(|e| TypedDataError::Encoding(e.to_string()))?,
            );
        }

        Ok(json!({
            "types": types,
            "primaryType": primary_type,
            "domain": self.domain,
            "message": self.value,
        }))
    }
}

/// An action awaiting signature. Never persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct UnsignedAction {
    pub id: String,
    pub typed_data: TypedData,
}

impl UnsignedAction {
    /// Pair the action id with its signature; the typed data is dropped.
    pub fn into_signed(self, signature: Signature) -> SignedAction {
        SignedAction {
            id: self.id,
            signature,
        }
    }
}

/// Hex signature produced by the wallet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Signature(pub String);

impl Signature {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Signature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Action id plus signature, consumed once by the broadcaster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SignedAction {
    pub id: String,
    pub signature: Signature,
}

#[cfg(test)]
pub(crate) fn sample_post_typed_data() -> TypedData {
    let mut types = BTreeMap::new();
    types.insert(
        "Post".to_string(),
        vec![
            TypedDataField::new("profileId", "uint256"),
            TypedDataField::new("contentURI", "string"),
            TypedDataField::new("actionModules", "address[]"),
            TypedDataField::new("actionModulesInitDatas", "bytes[]"),
            TypedDataField::new("referenceModule", "address"),
            TypedDataField::new("referenceModuleInitData", "bytes"),
            TypedDataField::new("nonce", "uint256"),
            TypedDataField::new("deadline", "uint256"),
        ],
    );
    let value = json!({
        "profileId": "0x01",
        "contentURI": "ipfs://Qm123",
        "actionModules": [],
        "actionModulesInitDatas": [],
        "referenceModule": "0x0000000000000000000000000000000000000000",
        "referenceModuleInitData": "0x",
        "nonce": 0,
        "deadline": 1700000000
    });
    TypedData {
        domain: TypedDataDomain {
            name: "Lens Protocol Profiles".into(),
            version: "2".into(),
            chain_id: 80001,
            verifying_contract: "0x4fbffF20302F3326B20052ab9C217C44F6480900".into(),
        },
        types,
        value: value.as_object().cloned().unwrap_or_default(),
    }
}
