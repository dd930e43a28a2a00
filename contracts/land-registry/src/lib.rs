//! Land Registry Contract
//!
//! Records who registered which property. Used as the fixture contract
//! for ledger harness tests.
//!
//! # Functions
//!
//! - `register-property (id uint) (details (string-ascii 256))` (public)
//!   Stores `{owner: tx-sender, details}` under `id` and returns `(ok true)`.
//! - `get-property-details (id uint)` (read-only)
//!   Returns `(some {owner, details})` or `none`.
//!
//! # Storage Layout
//!
//! - `properties`: `{id: uint}` -> `{owner: principal, details: (string-ascii 256)}`
//!
//! # Error Codes
//!
//! - `u100`: the id is already registered

use landreg_common::{
    contract::{Contract, ContractError, FunctionSignature, InvocationContext, MapSignature},
    types, TypeSignature, Value,
};
use log::debug;

// ============================================================================
// Constants
// ============================================================================

pub const CONTRACT_NAME: &str = "land-registry";

pub const FN_REGISTER_PROPERTY: &str = "register-property";
pub const FN_GET_PROPERTY_DETAILS: &str = "get-property-details";

const MAP_PROPERTIES: &str = "properties";

pub const MAX_DETAILS_LEN: u32 = 256;

/// Error codes
pub const ERR_ALREADY_REGISTERED: u128 = 100;

// ============================================================================
// Contract
// ============================================================================

pub struct LandRegistry {
    functions: Vec<FunctionSignature>,
    maps: Vec<MapSignature>,
}

impl LandRegistry {
    pub fn new() -> Self {
        Self {
            functions: vec![
                FunctionSignature::public(
                    FN_REGISTER_PROPERTY,
                    [
                        ("id", TypeSignature::UInt),
                        ("details", TypeSignature::Ascii(MAX_DETAILS_LEN)),
                    ],
                ),
                FunctionSignature::read_only(
                    FN_GET_PROPERTY_DETAILS,
                    [("id", TypeSignature::UInt)],
                ),
            ],
            maps: vec![MapSignature::new(
                MAP_PROPERTIES,
                TypeSignature::tuple([("id", TypeSignature::UInt)]),
                TypeSignature::tuple([
                    ("owner", TypeSignature::Principal),
                    ("details", TypeSignature::Ascii(MAX_DETAILS_LEN)),
                ]),
            )],
        }
    }

    fn property_key(id: &Value) -> Value {
        types::tuple([("id", id.clone())])
    }

    fn register_property(
        &self,
        id: &Value,
        details: &Value,
        ctx: &mut dyn InvocationContext,
    ) -> Result<Value, ContractError> {
        let owner = types::principal(*ctx.caller());
        let record = types::tuple([("owner", owner.clone()), ("details", details.clone())]);

        if !ctx.map_insert(MAP_PROPERTIES, Self::property_key(id), record)? {
            debug!("Property {} is already registered", id);
            return Ok(types::err(types::uint(ERR_ALREADY_REGISTERED)));
        }

        ctx.print(types::tuple([
            ("event", types::ascii("property-registered")),
            ("id", id.clone()),
            ("owner", owner),
        ]));
        Ok(types::ok(types::bool(true)))
    }

    fn get_property_details(
        &self,
        id: &Value,
        ctx: &dyn InvocationContext,
    ) -> Result<Value, ContractError> {
        Ok(match ctx.map_get(MAP_PROPERTIES, &Self::property_key(id))? {
            Some(record) => types::some(record),
            None => types::none(),
        })
    }
}

impl Default for LandRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl Contract for LandRegistry {
    fn functions(&self) -> &[FunctionSignature] {
        &self.functions
    }

    fn maps(&self) -> &[MapSignature] {
        &self.maps
    }

    fn call(
        &self,
        function: &str,
        args: &[Value],
        ctx: &mut dyn InvocationContext,
    ) -> Result<Value, ContractError> {
        // Arity and types are checked by the ledger before dispatch
        match (function, args) {
            (FN_REGISTER_PROPERTY, [id, details]) => self.register_property(id, details, ctx),
            (FN_GET_PROPERTY_DETAILS, [id]) => self.get_property_details(id, ctx),
            _ => Err(ContractError::UndefinedFunction(function.to_string())),
        }
    }
}
