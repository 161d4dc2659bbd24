//! Host functions, contract values and authorization trees.

use super::writer::join;
use super::{read_array, write_array, FromTxRep, ToTxRep, TxRepError, TxRepSource, TxRepWriter};
use crate::config::{MAX_SYMBOL_LENGTH, UNBOUNDED};
use crate::crypto::strkey;
use crate::types::soroban::{
    ContractExecutable, ContractIdPreimage, CreateContractArgs, HostFunction, Int128Parts,
    Int256Parts, InvokeContractArgs, ScAddress, ScMapEntry, ScVal, SorobanAddressCredentials,
    SorobanAuthorizationEntry, SorobanAuthorizedFunction, SorobanAuthorizedInvocation,
    SorobanCredentials, UInt128Parts, UInt256Parts,
};

impl ToTxRep for ScAddress {
    fn write_txrep(&self, w: &mut TxRepWriter, path: &str) {
        match self {
            Self::Account(account) => {
                w.union_arm(path, "SC_ADDRESS_TYPE_ACCOUNT");
                account.write_txrep(w, &join(path, "accountId"));
            }
            Self::Contract(id) => {
                w.union_arm(path, "SC_ADDRESS_TYPE_CONTRACT");
                w.field(&join(path, "contractId"), strkey::encode_contract(id));
            }
        }
    }
}

impl FromTxRep for ScAddress {
    fn read_txrep(src: &TxRepSource, path: &str) -> Result<Self, TxRepError> {
        match src.arm(path)? {
            "SC_ADDRESS_TYPE_ACCOUNT" => Ok(Self::Account(src.value(&join(path, "accountId"))?)),
            "SC_ADDRESS_TYPE_CONTRACT" => {
                let id_path = join(path, "contractId");
                let raw = src.get(&id_path)?;
                strkey::decode_contract(raw)
                    .map(Self::Contract)
                    .map_err(|_| TxRepError::malformed(&id_path, raw))
            }
            other => Err(TxRepError::unknown_arm(&join(path, "type"), other)),
        }
    }
}

// ---------------------------------------------------------------------------
// Values
// ---------------------------------------------------------------------------

impl ToTxRep for ScMapEntry {
    fn write_txrep(&self, w: &mut TxRepWriter, path: &str) {
        self.key.write_txrep(w, &join(path, "key"));
        self.val.write_txrep(w, &join(path, "val"));
    }
}

impl FromTxRep for ScMapEntry {
    fn read_txrep(src: &TxRepSource, path: &str) -> Result<Self, TxRepError> {
        Ok(Self {
            key: ScVal::read_txrep(src, &join(path, "key"))?,
            val: ScVal::read_txrep(src, &join(path, "val"))?,
        })
    }
}

impl ToTxRep for ScVal {
    fn write_txrep(&self, w: &mut TxRepWriter, path: &str) {
        let at = |name: &str| join(path, name);
        match self {
            Self::Bool(b) => {
                w.union_arm(path, "SCV_BOOL");
                w.field(&at("b"), b);
            }
            Self::Void => w.union_arm(path, "SCV_VOID"),
            Self::U32(v) => {
                w.union_arm(path, "SCV_U32");
                w.field(&at("u32"), v);
            }
            Self::I32(v) => {
                w.union_arm(path, "SCV_I32");
                w.field(&at("i32"), v);
            }
            Self::U64(v) => {
                w.union_arm(path, "SCV_U64");
                w.field(&at("u64"), v);
            }
            Self::I64(v) => {
                w.union_arm(path, "SCV_I64");
                w.field(&at("i64"), v);
            }
            Self::Timepoint(v) => {
                w.union_arm(path, "SCV_TIMEPOINT");
                w.timestamp(&at("timepoint"), *v);
            }
            Self::Duration(v) => {
                w.union_arm(path, "SCV_DURATION");
                w.field(&at("duration"), v);
            }
            Self::U128(parts) => {
                w.union_arm(path, "SCV_U128");
                w.field(&at("u128.hi"), parts.hi);
                w.field(&at("u128.lo"), parts.lo);
            }
            Self::I128(parts) => {
                w.union_arm(path, "SCV_I128");
                w.field(&at("i128.hi"), parts.hi);
                w.field(&at("i128.lo"), parts.lo);
            }
            Self::U256(parts) => {
                w.union_arm(path, "SCV_U256");
                w.field(&at("u256.hi_hi"), parts.hi_hi);
                w.field(&at("u256.hi_lo"), parts.hi_lo);
                w.field(&at("u256.lo_hi"), parts.lo_hi);
                w.field(&at("u256.lo_lo"), parts.lo_lo);
            }
            Self::I256(parts) => {
                w.union_arm(path, "SCV_I256");
                w.field(&at("i256.hi_hi"), parts.hi_hi);
                w.field(&at("i256.hi_lo"), parts.hi_lo);
                w.field(&at("i256.lo_hi"), parts.lo_hi);
                w.field(&at("i256.lo_lo"), parts.lo_lo);
            }
            Self::Bytes(bytes) => {
                w.union_arm(path, "SCV_BYTES");
                w.hex(&at("bytes"), bytes);
            }
            Self::String(s) => {
                w.union_arm(path, "SCV_STRING");
                w.string(&at("str"), s);
            }
            Self::Symbol(s) => {
                w.union_arm(path, "SCV_SYMBOL");
                w.string(&at("sym"), s);
            }
            Self::Vec(items) => {
                w.union_arm(path, "SCV_VEC");
                let vec_path = at("vec");
                w.field(&join(&vec_path, "_present"), items.is_some());
                if let Some(items) = items {
                    write_array(w, &vec_path, items);
                }
            }
            Self::Map(entries) => {
                w.union_arm(path, "SCV_MAP");
                let map_path = at("map");
                w.field(&join(&map_path, "_present"), entries.is_some());
                if let Some(entries) = entries {
                    write_array(w, &map_path, entries);
                }
            }
            Self::Address(address) => {
                w.union_arm(path, "SCV_ADDRESS");
                address.write_txrep(w, &at("address"));
            }
            Self::LedgerKeyContractInstance => {
                w.union_arm(path, "SCV_LEDGER_KEY_CONTRACT_INSTANCE")
            }
            Self::LedgerKeyNonce(nonce) => {
                w.union_arm(path, "SCV_LEDGER_KEY_NONCE");
                w.field(&at("nonce_key.nonce"), nonce);
            }
        }
    }
}

impl FromTxRep for ScVal {
    fn read_txrep(src: &TxRepSource, path: &str) -> Result<Self, TxRepError> {
        match src.arm(path)? {
            "SCV_VEC" => {
                let vec_path = join(path, "vec");
                Ok(Self::Vec(if src.present(&vec_path)? {
                    Some(src.nested(&vec_path, |src| read_array(src, &vec_path, UNBOUNDED))?)
                } else {
                    None
                }))
            }
            "SCV_MAP" => {
                let map_path = join(path, "map");
                Ok(Self::Map(if src.present(&map_path)? {
                    Some(src.nested(&map_path, |src| read_array(src, &map_path, UNBOUNDED))?)
                } else {
                    None
                }))
            }
            arm => read_scalar(src, path, arm),
        }
    }
}

/// Every non-container arm. Kept out of line so the recursive
/// vec/map path carries only a small frame per level.
#[inline(never)]
fn read_scalar(src: &TxRepSource, path: &str, arm: &str) -> Result<ScVal, TxRepError> {
    let at = |name: &str| join(path, name);
    Ok(match arm {
        "SCV_BOOL" => ScVal::Bool(src.bool(&at("b"))?),
        "SCV_VOID" => ScVal::Void,
        "SCV_U32" => ScVal::U32(src.value(&at("u32"))?),
        "SCV_I32" => ScVal::I32(src.value(&at("i32"))?),
        "SCV_U64" => ScVal::U64(src.value(&at("u64"))?),
        "SCV_I64" => ScVal::I64(src.value(&at("i64"))?),
        "SCV_TIMEPOINT" => ScVal::Timepoint(src.value(&at("timepoint"))?),
        "SCV_DURATION" => ScVal::Duration(src.value(&at("duration"))?),
        "SCV_U128" => ScVal::U128(UInt128Parts {
            hi: src.value(&at("u128.hi"))?,
            lo: src.value(&at("u128.lo"))?,
        }),
        "SCV_I128" => ScVal::I128(Int128Parts {
            hi: src.value(&at("i128.hi"))?,
            lo: src.value(&at("i128.lo"))?,
        }),
        "SCV_U256" => ScVal::U256(UInt256Parts {
            hi_hi: src.value(&at("u256.hi_hi"))?,
            hi_lo: src.value(&at("u256.hi_lo"))?,
            lo_hi: src.value(&at("u256.lo_hi"))?,
            lo_lo: src.value(&at("u256.lo_lo"))?,
        }),
        "SCV_I256" => ScVal::I256(Int256Parts {
            hi_hi: src.value(&at("i256.hi_hi"))?,
            hi_lo: src.value(&at("i256.hi_lo"))?,
            lo_hi: src.value(&at("i256.lo_hi"))?,
            lo_lo: src.value(&at("i256.lo_lo"))?,
        }),
        "SCV_BYTES" => ScVal::Bytes(src.hex(&at("bytes"), UNBOUNDED)?),
        "SCV_STRING" => ScVal::String(src.string(&at("str"), UNBOUNDED)?),
        "SCV_SYMBOL" => ScVal::Symbol(src.string(&at("sym"), MAX_SYMBOL_LENGTH)?),
        "SCV_ADDRESS" => ScVal::Address(ScAddress::read_txrep(src, &at("address"))?),
        "SCV_LEDGER_KEY_CONTRACT_INSTANCE" => ScVal::LedgerKeyContractInstance,
        "SCV_LEDGER_KEY_NONCE" => ScVal::LedgerKeyNonce(src.value(&at("nonce_key.nonce"))?),
        other => return Err(TxRepError::unknown_arm(&at("type"), other)),
    })
}

// ---------------------------------------------------------------------------
// Host functions
// ---------------------------------------------------------------------------

impl ToTxRep for InvokeContractArgs {
    fn write_txrep(&self, w: &mut TxRepWriter, path: &str) {
        self.contract_address
            .write_txrep(w, &join(path, "contractAddress"));
        w.string(&join(path, "functionName"), &self.function_name);
        write_array(w, &join(path, "args"), &self.args);
    }
}

impl FromTxRep for InvokeContractArgs {
    fn read_txrep(src: &TxRepSource, path: &str) -> Result<Self, TxRepError> {
        Ok(Self {
            contract_address: ScAddress::read_txrep(src, &join(path, "contractAddress"))?,
            function_name: src.string(&join(path, "functionName"), MAX_SYMBOL_LENGTH)?,
            args: read_array(src, &join(path, "args"), UNBOUNDED)?,
        })
    }
}

impl ToTxRep for ContractIdPreimage {
    fn write_txrep(&self, w: &mut TxRepWriter, path: &str) {
        match self {
            Self::FromAddress { address, salt } => {
                w.union_arm(path, "CONTRACT_ID_PREIMAGE_FROM_ADDRESS");
                address.write_txrep(w, &join(path, "fromAddress.address"));
                w.hex(&join(path, "fromAddress.salt"), salt);
            }
            Self::FromAsset(asset) => {
                w.union_arm(path, "CONTRACT_ID_PREIMAGE_FROM_ASSET");
                asset.write_txrep(w, &join(path, "fromAsset"));
            }
        }
    }
}

impl FromTxRep for ContractIdPreimage {
    fn read_txrep(src: &TxRepSource, path: &str) -> Result<Self, TxRepError> {
        match src.arm(path)? {
            "CONTRACT_ID_PREIMAGE_FROM_ADDRESS" => Ok(Self::FromAddress {
                address: ScAddress::read_txrep(src, &join(path, "fromAddress.address"))?,
                salt: src.hex_fixed(&join(path, "fromAddress.salt"))?,
            }),
            "CONTRACT_ID_PREIMAGE_FROM_ASSET" => {
                Ok(Self::FromAsset(src.value(&join(path, "fromAsset"))?))
            }
            other => Err(TxRepError::unknown_arm(&join(path, "type"), other)),
        }
    }
}

impl ToTxRep for ContractExecutable {
    fn write_txrep(&self, w: &mut TxRepWriter, path: &str) {
        match self {
            Self::Wasm(hash) => {
                w.union_arm(path, "CONTRACT_EXECUTABLE_WASM");
                w.hex(&join(path, "wasm_hash"), hash);
            }
            Self::StellarAsset => w.union_arm(path, "CONTRACT_EXECUTABLE_STELLAR_ASSET"),
        }
    }
}

impl FromTxRep for ContractExecutable {
    fn read_txrep(src: &TxRepSource, path: &str) -> Result<Self, TxRepError> {
        match src.arm(path)? {
            "CONTRACT_EXECUTABLE_WASM" => Ok(Self::Wasm(src.hex_fixed(&join(path, "wasm_hash"))?)),
            "CONTRACT_EXECUTABLE_STELLAR_ASSET" => Ok(Self::StellarAsset),
            other => Err(TxRepError::unknown_arm(&join(path, "type"), other)),
        }
    }
}

impl ToTxRep for CreateContractArgs {
    fn write_txrep(&self, w: &mut TxRepWriter, path: &str) {
        self.contract_id_preimage
            .write_txrep(w, &join(path, "contractIDPreimage"));
        self.executable.write_txrep(w, &join(path, "executable"));
    }
}

impl FromTxRep for CreateContractArgs {
    fn read_txrep(src: &TxRepSource, path: &str) -> Result<Self, TxRepError> {
        Ok(Self {
            contract_id_preimage: ContractIdPreimage::read_txrep(
                src,
                &join(path, "contractIDPreimage"),
            )?,
            executable: ContractExecutable::read_txrep(src, &join(path, "executable"))?,
        })
    }
}

impl ToTxRep for HostFunction {
    fn write_txrep(&self, w: &mut TxRepWriter, path: &str) {
        match self {
            Self::InvokeContract(args) => {
                w.union_arm(path, "HOST_FUNCTION_TYPE_INVOKE_CONTRACT");
                args.write_txrep(w, &join(path, "invokeContract"));
            }
            Self::CreateContract(args) => {
                w.union_arm(path, "HOST_FUNCTION_TYPE_CREATE_CONTRACT");
                args.write_txrep(w, &join(path, "createContract"));
            }
            Self::UploadContractWasm(wasm) => {
                w.union_arm(path, "HOST_FUNCTION_TYPE_UPLOAD_CONTRACT_WASM");
                w.hex(&join(path, "wasm"), wasm);
            }
        }
    }
}

impl FromTxRep for HostFunction {
    fn read_txrep(src: &TxRepSource, path: &str) -> Result<Self, TxRepError> {
        match src.arm(path)? {
            "HOST_FUNCTION_TYPE_INVOKE_CONTRACT" => Ok(Self::InvokeContract(
                InvokeContractArgs::read_txrep(src, &join(path, "invokeContract"))?,
            )),
            "HOST_FUNCTION_TYPE_CREATE_CONTRACT" => Ok(Self::CreateContract(
                CreateContractArgs::read_txrep(src, &join(path, "createContract"))?,
            )),
            "HOST_FUNCTION_TYPE_UPLOAD_CONTRACT_WASM" => Ok(Self::UploadContractWasm(
                src.hex(&join(path, "wasm"), UNBOUNDED)?,
            )),
            other => Err(TxRepError::unknown_arm(&join(path, "type"), other)),
        }
    }
}

// ---------------------------------------------------------------------------
// Authorization
// ---------------------------------------------------------------------------

impl ToTxRep for SorobanCredentials {
    fn write_txrep(&self, w: &mut TxRepWriter, path: &str) {
        match self {
            Self::SourceAccount => w.union_arm(path, "SOROBAN_CREDENTIALS_SOURCE_ACCOUNT"),
            Self::Address(credentials) => {
                w.union_arm(path, "SOROBAN_CREDENTIALS_ADDRESS");
                let at = |name: &str| join(path, &format!("address.{name}"));
                credentials.address.write_txrep(w, &at("address"));
                w.field(&at("nonce"), credentials.nonce);
                w.field(
                    &at("signatureExpirationLedger"),
                    credentials.signature_expiration_ledger,
                );
                credentials.signature.write_txrep(w, &at("signature"));
            }
        }
    }
}

impl FromTxRep for SorobanCredentials {
    fn read_txrep(src: &TxRepSource, path: &str) -> Result<Self, TxRepError> {
        match src.arm(path)? {
            "SOROBAN_CREDENTIALS_SOURCE_ACCOUNT" => Ok(Self::SourceAccount),
            "SOROBAN_CREDENTIALS_ADDRESS" => {
                let at = |name: &str| join(path, &format!("address.{name}"));
                Ok(Self::Address(SorobanAddressCredentials {
                    address: ScAddress::read_txrep(src, &at("address"))?,
                    nonce: src.value(&at("nonce"))?,
                    signature_expiration_ledger: src.value(&at("signatureExpirationLedger"))?,
                    signature: ScVal::read_txrep(src, &at("signature"))?,
                }))
            }
            other => Err(TxRepError::unknown_arm(&join(path, "type"), other)),
        }
    }
}

impl ToTxRep for SorobanAuthorizedFunction {
    fn write_txrep(&self, w: &mut TxRepWriter, path: &str) {
        match self {
            Self::ContractFn(args) => {
                w.union_arm(path, "SOROBAN_AUTHORIZED_FUNCTION_TYPE_CONTRACT_FN");
                args.write_txrep(w, &join(path, "contractFn"));
            }
            Self::CreateContractHostFn(args) => {
                w.union_arm(path, "SOROBAN_AUTHORIZED_FUNCTION_TYPE_CREATE_CONTRACT_HOST_FN");
                args.write_txrep(w, &join(path, "createContractHostFn"));
            }
        }
    }
}

impl FromTxRep for SorobanAuthorizedFunction {
    fn read_txrep(src: &TxRepSource, path: &str) -> Result<Self, TxRepError> {
        match src.arm(path)? {
            "SOROBAN_AUTHORIZED_FUNCTION_TYPE_CONTRACT_FN" => Ok(Self::ContractFn(
                InvokeContractArgs::read_txrep(src, &join(path, "contractFn"))?,
            )),
            "SOROBAN_AUTHORIZED_FUNCTION_TYPE_CREATE_CONTRACT_HOST_FN" => {
                Ok(Self::CreateContractHostFn(CreateContractArgs::read_txrep(
                    src,
                    &join(path, "createContractHostFn"),
                )?))
            }
            other => Err(TxRepError::unknown_arm(&join(path, "type"), other)),
        }
    }
}

impl ToTxRep for SorobanAuthorizedInvocation {
    fn write_txrep(&self, w: &mut TxRepWriter, path: &str) {
        self.function.write_txrep(w, &join(path, "function"));
        write_array(w, &join(path, "subInvocations"), &self.sub_invocations);
    }
}

impl FromTxRep for SorobanAuthorizedInvocation {
    fn read_txrep(src: &TxRepSource, path: &str) -> Result<Self, TxRepError> {
        let subs = join(path, "subInvocations");
        Ok(Self {
            function: SorobanAuthorizedFunction::read_txrep(src, &join(path, "function"))?,
            sub_invocations: src.nested(&subs, |src| read_array(src, &subs, UNBOUNDED))?,
        })
    }
}

impl ToTxRep for SorobanAuthorizationEntry {
    fn write_txrep(&self, w: &mut TxRepWriter, path: &str) {
        self.credentials.write_txrep(w, &join(path, "credentials"));
        self.root_invocation
            .write_txrep(w, &join(path, "rootInvocation"));
    }
}

impl FromTxRep for SorobanAuthorizationEntry {
    fn read_txrep(src: &TxRepSource, path: &str) -> Result<Self, TxRepError> {
        Ok(Self {
            credentials: SorobanCredentials::read_txrep(src, &join(path, "credentials"))?,
            root_invocation: SorobanAuthorizedInvocation::read_txrep(
                src,
                &join(path, "rootInvocation"),
            )?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MAX_TXREP_DEPTH;
    use crate::types::AccountId;

    fn round_trip<T: ToTxRep + FromTxRep + PartialEq + std::fmt::Debug>(value: &T) -> String {
        let mut w = TxRepWriter::new();
        value.write_txrep(&mut w, "v");
        let text = w.into_string();
        let src = TxRepSource::parse(&text).unwrap();
        assert_eq!(&T::read_txrep(&src, "v").unwrap(), value);
        text
    }

    #[test]
    fn contract_address_is_strkey() {
        let text = round_trip(&ScAddress::Contract([9; 32]));
        assert_eq!(
            text,
            "v.type: SC_ADDRESS_TYPE_CONTRACT\n\
             v.contractId: CAEQSCIJBEEQSCIJBEEQSCIJBEEQSCIJBEEQSCIJBEEQSCIJBEEQTD2L\n"
        );
        let text = round_trip(&ScAddress::Account(AccountId([1; 32])));
        assert!(text.ends_with(
            "v.accountId: GAAQCAIBAEAQCAIBAEAQCAIBAEAQCAIBAEAQCAIBAEAQCAIBAEAQDZ7H\n"
        ));
    }

    #[test]
    fn nested_values_round_trip() {
        let value = ScVal::Map(Some(vec![ScMapEntry {
            key: ScVal::Symbol("balance".into()),
            val: ScVal::Vec(Some(vec![
                ScVal::I128(Int128Parts { hi: -1, lo: 7 }),
                ScVal::Vec(None),
                ScVal::Bytes(vec![0xde, 0xad]),
            ])),
        }]));
        let text = round_trip(&value);
        assert!(text.contains("v.map[0].key.sym: \"balance\"\n"));
        assert!(text.contains("v.map[0].val.vec[0].i128.hi: -1\n"));
        assert!(text.contains("v.map[0].val.vec[1].vec._present: false\n"));
        assert!(text.contains("v.map[0].val.vec[2].bytes: dead\n"));
    }

    #[test]
    fn symbol_over_32_bytes_rejected() {
        let src = TxRepSource::parse(&format!(
            "v.type: SCV_SYMBOL\nv.sym: \"{}\"\n",
            "s".repeat(33)
        ))
        .unwrap();
        assert!(matches!(
            ScVal::read_txrep(&src, "v"),
            Err(TxRepError::MalformedLiteral { .. })
        ));
    }

    #[test]
    fn auth_entry_round_trips() {
        let entry = SorobanAuthorizationEntry {
            credentials: SorobanCredentials::Address(SorobanAddressCredentials {
                address: ScAddress::Account(AccountId([2; 32])),
                nonce: 42,
                signature_expiration_ledger: 1000,
                signature: ScVal::Void,
            }),
            root_invocation: SorobanAuthorizedInvocation {
                function: SorobanAuthorizedFunction::ContractFn(InvokeContractArgs {
                    contract_address: ScAddress::Contract([9; 32]),
                    function_name: "transfer".into(),
                    args: vec![ScVal::U32(5)],
                }),
                sub_invocations: vec![SorobanAuthorizedInvocation {
                    function: SorobanAuthorizedFunction::CreateContractHostFn(
                        CreateContractArgs {
                            contract_id_preimage: ContractIdPreimage::FromAddress {
                                address: ScAddress::Contract([9; 32]),
                                salt: [1; 32],
                            },
                            executable: ContractExecutable::StellarAsset,
                        },
                    ),
                    sub_invocations: vec![],
                }],
            },
        };
        let text = round_trip(&entry);
        assert!(text.contains("v.credentials.address.nonce: 42\n"));
        assert!(text.contains("v.rootInvocation.function.contractFn.functionName: \"transfer\"\n"));
        assert!(text.contains("v.rootInvocation.subInvocations[0].subInvocations.len: 0\n"));
    }

    fn nested_vec(levels: u32) -> ScVal {
        (0..levels).fold(ScVal::U32(7), |inner, _| ScVal::Vec(Some(vec![inner])))
    }

    #[test]
    fn vec_nesting_at_the_ceiling_parses_on_a_default_thread() {
        // Spawned threads get a 2 MiB stack, smaller than the main test thread.
        let outcome = std::thread::spawn(|| {
            let deepest = nested_vec(MAX_TXREP_DEPTH);
            let mut w = TxRepWriter::new();
            deepest.write_txrep(&mut w, "v");
            let src = TxRepSource::parse(&w.into_string()).unwrap();
            assert_eq!(ScVal::read_txrep(&src, "v").unwrap(), deepest);

            let too_deep = nested_vec(MAX_TXREP_DEPTH + 1);
            let mut w = TxRepWriter::new();
            too_deep.write_txrep(&mut w, "v");
            let src = TxRepSource::parse(&w.into_string()).unwrap();
            assert!(matches!(
                ScVal::read_txrep(&src, "v"),
                Err(TxRepError::DepthLimitExceeded { .. })
            ));
        })
        .join();
        assert!(outcome.is_ok());
    }

    #[test]
    fn unknown_host_function_rejected() {
        let src = TxRepSource::parse("v.type: HOST_FUNCTION_TYPE_TELEPORT\n").unwrap();
        assert_eq!(
            HostFunction::read_txrep(&src, "v").unwrap_err(),
            TxRepError::UnknownUnionArm {
                path: "v.type".into(),
                arm: "HOST_FUNCTION_TYPE_TELEPORT".into()
            }
        );
    }
}
