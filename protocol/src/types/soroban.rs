//! Soroban payloads carried by `INVOKE_HOST_FUNCTION`.
//!
//! Only what a transaction envelope can contain is modelled: host
//! functions, contract values and authorization trees. Ledger-side values
//! (`SCV_ERROR`, `SCV_CONTRACT_INSTANCE`) are not, and decode as unknown
//! discriminants.

use super::{AccountId, Asset};
use crate::config::{MAX_SYMBOL_LENGTH, UNBOUNDED};
use crate::xdr::{
    impl_xdr_struct, read_array, write_array, ReadXdr, WriteXdr, XdrError, XdrReader, XdrWriter,
};

// ---------------------------------------------------------------------------
// Addresses
// ---------------------------------------------------------------------------

const SC_ADDRESS_TYPE_ACCOUNT: i32 = 0;
const SC_ADDRESS_TYPE_CONTRACT: i32 = 1;

/// An account (`G...`) or a contract (`C...`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScAddress {
    Account(AccountId),
    Contract([u8; 32]),
}

impl WriteXdr for ScAddress {
    fn write_xdr(&self, w: &mut XdrWriter) -> Result<(), XdrError> {
        match self {
            Self::Account(account) => {
                w.write_discriminant(SC_ADDRESS_TYPE_ACCOUNT);
                account.write_xdr(w)
            }
            Self::Contract(id) => {
                w.write_discriminant(SC_ADDRESS_TYPE_CONTRACT);
                w.write_fixed(id);
                Ok(())
            }
        }
    }
}

impl ReadXdr for ScAddress {
    fn read_xdr(r: &mut XdrReader<'_>) -> Result<Self, XdrError> {
        match r.read_discriminant()? {
            SC_ADDRESS_TYPE_ACCOUNT => Ok(Self::Account(AccountId::read_xdr(r)?)),
            SC_ADDRESS_TYPE_CONTRACT => Ok(Self::Contract(r.read_fixed()?)),
            other => Err(r.unknown("SCAddressType", other)),
        }
    }
}

// ---------------------------------------------------------------------------
// Values
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UInt128Parts {
    pub hi: u64,
    pub lo: u64,
}

impl_xdr_struct!(UInt128Parts { hi, lo });

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Int128Parts {
    pub hi: i64,
    pub lo: u64,
}

impl_xdr_struct!(Int128Parts { hi, lo });

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UInt256Parts {
    pub hi_hi: u64,
    pub hi_lo: u64,
    pub lo_hi: u64,
    pub lo_lo: u64,
}

impl_xdr_struct!(UInt256Parts {
    hi_hi,
    hi_lo,
    lo_hi,
    lo_lo
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Int256Parts {
    pub hi_hi: i64,
    pub hi_lo: u64,
    pub lo_hi: u64,
    pub lo_lo: u64,
}

impl_xdr_struct!(Int256Parts {
    hi_hi,
    hi_lo,
    lo_hi,
    lo_lo
});

const SCV_BOOL: i32 = 0;
const SCV_VOID: i32 = 1;
const SCV_U32: i32 = 3;
const SCV_I32: i32 = 4;
const SCV_U64: i32 = 5;
const SCV_I64: i32 = 6;
const SCV_TIMEPOINT: i32 = 7;
const SCV_DURATION: i32 = 8;
const SCV_U128: i32 = 9;
const SCV_I128: i32 = 10;
const SCV_U256: i32 = 11;
const SCV_I256: i32 = 12;
const SCV_BYTES: i32 = 13;
const SCV_STRING: i32 = 14;
const SCV_SYMBOL: i32 = 15;
const SCV_VEC: i32 = 16;
const SCV_MAP: i32 = 17;
const SCV_ADDRESS: i32 = 18;
const SCV_LEDGER_KEY_CONTRACT_INSTANCE: i32 = 20;
const SCV_LEDGER_KEY_NONCE: i32 = 21;

/// A contract value: function arguments, auth signatures, map keys.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ScVal {
    Bool(bool),
    Void,
    U32(u32),
    I32(i32),
    U64(u64),
    I64(i64),
    Timepoint(u64),
    Duration(u64),
    U128(UInt128Parts),
    I128(Int128Parts),
    U256(UInt256Parts),
    I256(Int256Parts),
    Bytes(Vec<u8>),
    String(String),
    Symbol(String),
    /// `SCVec *vec`: the vector itself is optional on the wire.
    Vec(Option<Vec<ScVal>>),
    Map(Option<Vec<ScMapEntry>>),
    Address(ScAddress),
    LedgerKeyContractInstance,
    LedgerKeyNonce(i64),
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ScMapEntry {
    pub key: ScVal,
    pub val: ScVal,
}

impl_xdr_struct!(ScMapEntry { key, val });

impl WriteXdr for ScVal {
    fn write_xdr(&self, w: &mut XdrWriter) -> Result<(), XdrError> {
        match self {
            Self::Bool(v) => {
                w.write_discriminant(SCV_BOOL);
                w.write_bool(*v);
            }
            Self::Void => w.write_discriminant(SCV_VOID),
            Self::U32(v) => {
                w.write_discriminant(SCV_U32);
                w.write_u32(*v);
            }
            Self::I32(v) => {
                w.write_discriminant(SCV_I32);
                w.write_i32(*v);
            }
            Self::U64(v) => {
                w.write_discriminant(SCV_U64);
                w.write_u64(*v);
            }
            Self::I64(v) => {
                w.write_discriminant(SCV_I64);
                w.write_i64(*v);
            }
            Self::Timepoint(v) => {
                w.write_discriminant(SCV_TIMEPOINT);
                w.write_u64(*v);
            }
            Self::Duration(v) => {
                w.write_discriminant(SCV_DURATION);
                w.write_u64(*v);
            }
            Self::U128(parts) => {
                w.write_discriminant(SCV_U128);
                parts.write_xdr(w)?;
            }
            Self::I128(parts) => {
                w.write_discriminant(SCV_I128);
                parts.write_xdr(w)?;
            }
            Self::U256(parts) => {
                w.write_discriminant(SCV_U256);
                parts.write_xdr(w)?;
            }
            Self::I256(parts) => {
                w.write_discriminant(SCV_I256);
                parts.write_xdr(w)?;
            }
            Self::Bytes(bytes) => {
                w.write_discriminant(SCV_BYTES);
                w.write_var_opaque(bytes, UNBOUNDED)?;
            }
            Self::String(s) => {
                w.write_discriminant(SCV_STRING);
                w.write_string(s, UNBOUNDED)?;
            }
            Self::Symbol(s) => {
                w.write_discriminant(SCV_SYMBOL);
                w.write_string(s, MAX_SYMBOL_LENGTH)?;
            }
            Self::Vec(items) => {
                w.write_discriminant(SCV_VEC);
                w.write_bool(items.is_some());
                if let Some(items) = items {
                    write_array(w, items, UNBOUNDED)?;
                }
            }
            Self::Map(entries) => {
                w.write_discriminant(SCV_MAP);
                w.write_bool(entries.is_some());
                if let Some(entries) = entries {
                    write_array(w, entries, UNBOUNDED)?;
                }
            }
            Self::Address(address) => {
                w.write_discriminant(SCV_ADDRESS);
                address.write_xdr(w)?;
            }
            Self::LedgerKeyContractInstance => {
                w.write_discriminant(SCV_LEDGER_KEY_CONTRACT_INSTANCE)
            }
            Self::LedgerKeyNonce(nonce) => {
                w.write_discriminant(SCV_LEDGER_KEY_NONCE);
                w.write_i64(*nonce);
            }
        }
        Ok(())
    }
}

impl ReadXdr for ScVal {
    fn read_xdr(r: &mut XdrReader<'_>) -> Result<Self, XdrError> {
        Ok(match r.read_discriminant()? {
            SCV_BOOL => Self::Bool(r.read_bool()?),
            SCV_VOID => Self::Void,
            SCV_U32 => Self::U32(r.read_u32()?),
            SCV_I32 => Self::I32(r.read_i32()?),
            SCV_U64 => Self::U64(r.read_u64()?),
            SCV_I64 => Self::I64(r.read_i64()?),
            SCV_TIMEPOINT => Self::Timepoint(r.read_u64()?),
            SCV_DURATION => Self::Duration(r.read_u64()?),
            SCV_U128 => Self::U128(UInt128Parts::read_xdr(r)?),
            SCV_I128 => Self::I128(Int128Parts::read_xdr(r)?),
            SCV_U256 => Self::U256(UInt256Parts::read_xdr(r)?),
            SCV_I256 => Self::I256(Int256Parts::read_xdr(r)?),
            SCV_BYTES => Self::Bytes(r.read_var_opaque(UNBOUNDED)?),
            SCV_STRING => Self::String(r.read_string(UNBOUNDED)?),
            SCV_SYMBOL => Self::Symbol(r.read_string(MAX_SYMBOL_LENGTH)?),
            SCV_VEC => {
                let items = if r.read_bool()? {
                    Some(r.nested(|r| read_array(r, UNBOUNDED))?)
                } else {
                    None
                };
                Self::Vec(items)
            }
            SCV_MAP => {
                let entries = if r.read_bool()? {
                    Some(r.nested(|r| read_array(r, UNBOUNDED))?)
                } else {
                    None
                };
                Self::Map(entries)
            }
            SCV_ADDRESS => Self::Address(ScAddress::read_xdr(r)?),
            SCV_LEDGER_KEY_CONTRACT_INSTANCE => Self::LedgerKeyContractInstance,
            SCV_LEDGER_KEY_NONCE => Self::LedgerKeyNonce(r.read_i64()?),
            other => return Err(r.unknown("SCValType", other)),
        })
    }
}

// ---------------------------------------------------------------------------
// Host functions
// ---------------------------------------------------------------------------

/// A call to `function_name` on a deployed contract.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct InvokeContractArgs {
    pub contract_address: ScAddress,
    pub function_name: String,
    pub args: Vec<ScVal>,
}

impl WriteXdr for InvokeContractArgs {
    fn write_xdr(&self, w: &mut XdrWriter) -> Result<(), XdrError> {
        self.contract_address.write_xdr(w)?;
        w.write_string(&self.function_name, MAX_SYMBOL_LENGTH)?;
        write_array(w, &self.args, UNBOUNDED)
    }
}

impl ReadXdr for InvokeContractArgs {
    fn read_xdr(r: &mut XdrReader<'_>) -> Result<Self, XdrError> {
        Ok(Self {
            contract_address: ScAddress::read_xdr(r)?,
            function_name: r.read_string(MAX_SYMBOL_LENGTH)?,
            args: read_array(r, UNBOUNDED)?,
        })
    }
}

const CONTRACT_ID_PREIMAGE_FROM_ADDRESS: i32 = 0;
const CONTRACT_ID_PREIMAGE_FROM_ASSET: i32 = 1;

/// What a new contract's id is derived from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContractIdPreimage {
    FromAddress { address: ScAddress, salt: [u8; 32] },
    FromAsset(Asset),
}

impl WriteXdr for ContractIdPreimage {
    fn write_xdr(&self, w: &mut XdrWriter) -> Result<(), XdrError> {
        match self {
            Self::FromAddress { address, salt } => {
                w.write_discriminant(CONTRACT_ID_PREIMAGE_FROM_ADDRESS);
                address.write_xdr(w)?;
                w.write_fixed(salt);
                Ok(())
            }
            Self::FromAsset(asset) => {
                w.write_discriminant(CONTRACT_ID_PREIMAGE_FROM_ASSET);
                asset.write_xdr(w)
            }
        }
    }
}

impl ReadXdr for ContractIdPreimage {
    fn read_xdr(r: &mut XdrReader<'_>) -> Result<Self, XdrError> {
        match r.read_discriminant()? {
            CONTRACT_ID_PREIMAGE_FROM_ADDRESS => Ok(Self::FromAddress {
                address: ScAddress::read_xdr(r)?,
                salt: r.read_fixed()?,
            }),
            CONTRACT_ID_PREIMAGE_FROM_ASSET => Ok(Self::FromAsset(Asset::read_xdr(r)?)),
            other => Err(r.unknown("ContractIDPreimageType", other)),
        }
    }
}

const CONTRACT_EXECUTABLE_WASM: i32 = 0;
const CONTRACT_EXECUTABLE_STELLAR_ASSET: i32 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContractExecutable {
    /// Hash of previously uploaded WASM.
    Wasm([u8; 32]),
    /// The built-in asset contract.
    StellarAsset,
}

impl WriteXdr for ContractExecutable {
    fn write_xdr(&self, w: &mut XdrWriter) -> Result<(), XdrError> {
        match self {
            Self::Wasm(hash) => {
                w.write_discriminant(CONTRACT_EXECUTABLE_WASM);
                w.write_fixed(hash);
            }
            Self::StellarAsset => w.write_discriminant(CONTRACT_EXECUTABLE_STELLAR_ASSET),
        }
        Ok(())
    }
}

impl ReadXdr for ContractExecutable {
    fn read_xdr(r: &mut XdrReader<'_>) -> Result<Self, XdrError> {
        match r.read_discriminant()? {
            CONTRACT_EXECUTABLE_WASM => Ok(Self::Wasm(r.read_fixed()?)),
            CONTRACT_EXECUTABLE_STELLAR_ASSET => Ok(Self::StellarAsset),
            other => Err(r.unknown("ContractExecutableType", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CreateContractArgs {
    pub contract_id_preimage: ContractIdPreimage,
    pub executable: ContractExecutable,
}

impl_xdr_struct!(CreateContractArgs {
    contract_id_preimage,
    executable
});

const HOST_FUNCTION_TYPE_INVOKE_CONTRACT: i32 = 0;
const HOST_FUNCTION_TYPE_CREATE_CONTRACT: i32 = 1;
const HOST_FUNCTION_TYPE_UPLOAD_CONTRACT_WASM: i32 = 2;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum HostFunction {
    InvokeContract(InvokeContractArgs),
    CreateContract(CreateContractArgs),
    UploadContractWasm(Vec<u8>),
}

impl WriteXdr for HostFunction {
    fn write_xdr(&self, w: &mut XdrWriter) -> Result<(), XdrError> {
        match self {
            Self::InvokeContract(args) => {
                w.write_discriminant(HOST_FUNCTION_TYPE_INVOKE_CONTRACT);
                args.write_xdr(w)
            }
            Self::CreateContract(args) => {
                w.write_discriminant(HOST_FUNCTION_TYPE_CREATE_CONTRACT);
                args.write_xdr(w)
            }
            Self::UploadContractWasm(wasm) => {
                w.write_discriminant(HOST_FUNCTION_TYPE_UPLOAD_CONTRACT_WASM);
                w.write_var_opaque(wasm, UNBOUNDED)
            }
        }
    }
}

impl ReadXdr for HostFunction {
    fn read_xdr(r: &mut XdrReader<'_>) -> Result<Self, XdrError> {
        match r.read_discriminant()? {
            HOST_FUNCTION_TYPE_INVOKE_CONTRACT => {
                Ok(Self::InvokeContract(InvokeContractArgs::read_xdr(r)?))
            }
            HOST_FUNCTION_TYPE_CREATE_CONTRACT => {
                Ok(Self::CreateContract(CreateContractArgs::read_xdr(r)?))
            }
            HOST_FUNCTION_TYPE_UPLOAD_CONTRACT_WASM => {
                Ok(Self::UploadContractWasm(r.read_var_opaque(UNBOUNDED)?))
            }
            other => Err(r.unknown("HostFunctionType", other)),
        }
    }
}

// ---------------------------------------------------------------------------
// Authorization
// ---------------------------------------------------------------------------

const SOROBAN_CREDENTIALS_SOURCE_ACCOUNT: i32 = 0;
const SOROBAN_CREDENTIALS_ADDRESS: i32 = 1;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SorobanAddressCredentials {
    pub address: ScAddress,
    pub nonce: i64,
    pub signature_expiration_ledger: u32,
    pub signature: ScVal,
}

impl_xdr_struct!(SorobanAddressCredentials {
    address,
    nonce,
    signature_expiration_ledger,
    signature
});

/// Who authorizes an invocation: the transaction source itself, or an
/// address with its own signature.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SorobanCredentials {
    SourceAccount,
    Address(SorobanAddressCredentials),
}

impl WriteXdr for SorobanCredentials {
    fn write_xdr(&self, w: &mut XdrWriter) -> Result<(), XdrError> {
        match self {
            Self::SourceAccount => {
                w.write_discriminant(SOROBAN_CREDENTIALS_SOURCE_ACCOUNT);
                Ok(())
            }
            Self::Address(credentials) => {
                w.write_discriminant(SOROBAN_CREDENTIALS_ADDRESS);
                credentials.write_xdr(w)
            }
        }
    }
}

impl ReadXdr for SorobanCredentials {
    fn read_xdr(r: &mut XdrReader<'_>) -> Result<Self, XdrError> {
        match r.read_discriminant()? {
            SOROBAN_CREDENTIALS_SOURCE_ACCOUNT => Ok(Self::SourceAccount),
            SOROBAN_CREDENTIALS_ADDRESS => {
                Ok(Self::Address(SorobanAddressCredentials::read_xdr(r)?))
            }
            other => Err(r.unknown("SorobanCredentialsType", other)),
        }
    }
}

const SOROBAN_AUTHORIZED_FUNCTION_TYPE_CONTRACT_FN: i32 = 0;
const SOROBAN_AUTHORIZED_FUNCTION_TYPE_CREATE_CONTRACT_HOST_FN: i32 = 1;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SorobanAuthorizedFunction {
    ContractFn(InvokeContractArgs),
    CreateContractHostFn(CreateContractArgs),
}

impl WriteXdr for SorobanAuthorizedFunction {
    fn write_xdr(&self, w: &mut XdrWriter) -> Result<(), XdrError> {
        match self {
            Self::ContractFn(args) => {
                w.write_discriminant(SOROBAN_AUTHORIZED_FUNCTION_TYPE_CONTRACT_FN);
                args.write_xdr(w)
            }
            Self::CreateContractHostFn(args) => {
                w.write_discriminant(SOROBAN_AUTHORIZED_FUNCTION_TYPE_CREATE_CONTRACT_HOST_FN);
                args.write_xdr(w)
            }
        }
    }
}

impl ReadXdr for SorobanAuthorizedFunction {
    fn read_xdr(r: &mut XdrReader<'_>) -> Result<Self, XdrError> {
        match r.read_discriminant()? {
            SOROBAN_AUTHORIZED_FUNCTION_TYPE_CONTRACT_FN => {
                Ok(Self::ContractFn(InvokeContractArgs::read_xdr(r)?))
            }
            SOROBAN_AUTHORIZED_FUNCTION_TYPE_CREATE_CONTRACT_HOST_FN => {
                Ok(Self::CreateContractHostFn(CreateContractArgs::read_xdr(r)?))
            }
            other => Err(r.unknown("SorobanAuthorizedFunctionType", other)),
        }
    }
}

/// A tree of contract calls covered by one authorization.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SorobanAuthorizedInvocation {
    pub function: SorobanAuthorizedFunction,
    pub sub_invocations: Vec<SorobanAuthorizedInvocation>,
}

impl WriteXdr for SorobanAuthorizedInvocation {
    fn write_xdr(&self, w: &mut XdrWriter) -> Result<(), XdrError> {
        self.function.write_xdr(w)?;
        write_array(w, &self.sub_invocations, UNBOUNDED)
    }
}

impl ReadXdr for SorobanAuthorizedInvocation {
    fn read_xdr(r: &mut XdrReader<'_>) -> Result<Self, XdrError> {
        Ok(Self {
            function: SorobanAuthorizedFunction::read_xdr(r)?,
            sub_invocations: r.nested(|r| read_array(r, UNBOUNDED))?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SorobanAuthorizationEntry {
    pub credentials: SorobanCredentials,
    pub root_invocation: SorobanAuthorizedInvocation,
}

impl_xdr_struct!(SorobanAuthorizationEntry {
    credentials,
    root_invocation
});
