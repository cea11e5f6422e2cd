// Request Invocation Shapes

use serde_json::{Map, Value};

/// Request context bag.
///
/// Opaque key/value data owned by the caller; middleware may read and
/// extend it, this library never interprets the entries.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RpcContext {
    values: Map<String, Value>,
}

impl RpcContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert
    pub fn with(mut self, key: impl Into<String>, value: Value) -> Self {
        self.values.insert(key.into(), value);
        self
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: Value) {
        self.values.insert(key.into(), value);
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// What one middleware chain sees for one request
#[derive(Debug, Clone)]
pub struct Invocation {
    /// Full route path as the runtime addresses it (e.g. "math.add")
    pub path: String,
    pub ctx: RpcContext,
    pub input: Value,
}

/// Positional argument synthesized from parameter markers
#[derive(Debug, Clone, PartialEq)]
pub enum ProcArg {
    Context(RpcContext),
    Input(Value),
    /// Position with no marker
    Unset,
}

/// Call shape a method handler receives
#[derive(Debug, Clone, PartialEq)]
pub enum MethodCall {
    /// The runtime's native `(context, input)` shape, passed through unmodified
    Native { ctx: RpcContext, input: Value },
    /// Argument list reconstructed from declared context/input positions
    Positional(Vec<ProcArg>),
}

impl MethodCall {
    /// Context argument, whichever shape carried it
    pub fn ctx(&self) -> Option<&RpcContext> {
        match self {
            MethodCall::Native { ctx, .. } => Some(ctx),
            MethodCall::Positional(args) => args.iter().find_map(|arg| match arg {
                ProcArg::Context(ctx) => Some(ctx),
                _ => None,
            }),
        }
    }

    /// Input argument, whichever shape carried it
    pub fn input(&self) -> Option<&Value> {
        match self {
            MethodCall::Native { input, .. } => Some(input),
            MethodCall::Positional(args) => args.iter().find_map(|arg| match arg {
                ProcArg::Input(input) => Some(input),
                _ => None,
            }),
        }
    }
}
