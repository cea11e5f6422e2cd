// Executable in-memory procedure and its builder

use serde_json::Value;
use trellis_core::domain::{AnnotationBag, Invocation, ProcedureKind, RpcContext};
use trellis_core::error::RpcError;
use trellis_core::port::middleware::{MiddlewareRef, Next, ResolverRef};
use trellis_core::port::rpc::ProcedureBuilder;
use trellis_core::port::schema::SchemaRef;

/// A built procedure: validators, middleware chain, resolver, kind
#[derive(Clone)]
pub struct MemoryProcedure {
    kind: ProcedureKind,
    meta: AnnotationBag,
    input: Option<SchemaRef>,
    output: Option<SchemaRef>,
    middlewares: Vec<MiddlewareRef>,
    resolver: ResolverRef,
}

impl MemoryProcedure {
    pub fn kind(&self) -> ProcedureKind {
        self.kind
    }

    pub fn meta(&self) -> &AnnotationBag {
        &self.meta
    }

    pub fn has_input_schema(&self) -> bool {
        self.input.is_some()
    }

    pub fn has_output_schema(&self) -> bool {
        self.output.is_some()
    }

    /// Middleware labels in execution order
    pub fn middleware_names(&self) -> Vec<&'static str> {
        self.middlewares.iter().map(|m| m.name()).collect()
    }

    /// Run the full request pipeline: input validation, middleware chain,
    /// resolver, output validation
    pub async fn call(&self, path: &str, ctx: RpcContext, input: Value) -> Result<Value, RpcError> {
        let input = match &self.input {
            Some(schema) => schema.parse(&input)?,
            None => input,
        };

        let inv = Invocation {
            path: path.to_string(),
            ctx,
            input,
        };
        let out = Next::new(&self.middlewares, &self.resolver).run(inv).await?;

        match &self.output {
            Some(schema) => Ok(schema.parse(&out)?),
            None => Ok(out),
        }
    }
}

/// Accumulates builder calls until a terminal kind call
#[derive(Default)]
pub struct MemoryProcedureBuilder {
    meta: AnnotationBag,
    input: Option<SchemaRef>,
    output: Option<SchemaRef>,
    middlewares: Vec<MiddlewareRef>,
}

impl MemoryProcedureBuilder {
    fn finish(self, kind: ProcedureKind, resolver: ResolverRef) -> MemoryProcedure {
        MemoryProcedure {
            kind,
            meta: self.meta,
            input: self.input,
            output: self.output,
            middlewares: self.middlewares,
            resolver,
        }
    }
}

impl ProcedureBuilder for MemoryProcedureBuilder {
    type Procedure = MemoryProcedure;

    fn use_middleware(mut self, mw: MiddlewareRef) -> Self {
        self.middlewares.push(mw);
        self
    }

    fn input(mut self, schema: SchemaRef) -> Self {
        self.input = Some(schema);
        self
    }

    fn output(mut self, schema: SchemaRef) -> Self {
        self.output = Some(schema);
        self
    }

    fn meta(mut self, meta: AnnotationBag) -> Self {
        for (key, value) in meta {
            self.meta.insert(key, value);
        }
        self
    }

    fn query(self, resolver: ResolverRef) -> MemoryProcedure {
        self.finish(ProcedureKind::Query, resolver)
    }

    fn mutation(self, resolver: ResolverRef) -> MemoryProcedure {
        self.finish(ProcedureKind::Mutation, resolver)
    }

    fn subscription(self, resolver: ResolverRef) -> MemoryProcedure {
        self.finish(ProcedureKind::Subscription, resolver)
    }
}
