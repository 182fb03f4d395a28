//! # Object / Record Composer
//!
//! Builds a schema out of a [`Shape`]: an ordered list of field names, each
//! paired with the schema that validates that field.
//!
//! ## Algorithm
//!
//! 1. Input that is not a JSON object fails immediately with a single
//!    path-less issue carrying this composer's message. No field is visited.
//! 2. Fields are visited in declaration order. A missing key is validated
//!    as `null`.
//! 3. A failing field contributes each of its issues with the field name
//!    prepended to the issue path, and nothing to the output.
//!    A succeeding field contributes its validated value.
//! 4. Any accumulated issue fails the whole composite, with issues ordered
//!    by field, then by the order the field reported them.
//!
//! Keys absent from the shape are never read and never copied to the output.
//! The output record lists its keys in declaration order.
//!
//! ## Deferred Fields
//!
//! The walk stays synchronous while every field answers immediately. The
//! first field that defers hands the rest of the walk to an async
//! continuation, which awaits each remaining field in order. Field order,
//! and therefore issue order, is the same on both paths.

use envshape_core::{Issue, Outcome};
use serde_json::{Map, Value};

use crate::contract::{Schema, SchemaKind, Validation};

/// Default message for [`object`](crate::object) composers.
pub const DEFAULT_OBJECT_MESSAGE: &str = "Expected an object";

/// Default message for [`record`](crate::record) composers.
pub const DEFAULT_RECORD_MESSAGE: &str = "Invalid record";

static ABSENT: Value = Value::Null;

/// One named field of a [`Shape`].
#[derive(Debug)]
pub struct Field {
    name: String,
    schema: Box<dyn Schema>,
}

impl Field {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn schema(&self) -> &dyn Schema {
        self.schema.as_ref()
    }
}

/// Ordered mapping from field name to schema.
#[derive(Debug, Default)]
pub struct Shape {
    fields: Vec<Field>,
}

impl Shape {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare `name`, validated by `schema`.
    ///
    /// Re-declaring a name replaces its schema but keeps the position of the
    /// first declaration.
    pub fn field<S: Schema + 'static>(self, name: impl Into<String>, schema: S) -> Self {
        self.boxed_field(name, Box::new(schema))
    }

    /// [`field`](Self::field) for an already boxed schema.
    pub fn boxed_field(mut self, name: impl Into<String>, schema: Box<dyn Schema>) -> Self {
        let name = name.into();
        match self.fields.iter_mut().find(|field| field.name == name) {
            Some(existing) => existing.schema = schema,
            None => self.fields.push(Field { name, schema }),
        }
        self
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Field names in declaration order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|field| field.name.as_str())
    }

    /// Look up the schema declared for `name`.
    pub fn get(&self, name: &str) -> Option<&dyn Schema> {
        self.fields
            .iter()
            .find(|field| field.name == name)
            .map(Field::schema)
    }

    /// All fields in declaration order.
    pub fn fields(&self) -> &[Field] {
        &self.fields
    }
}

impl<N: Into<String>> FromIterator<(N, Box<dyn Schema>)> for Shape {
    fn from_iter<I: IntoIterator<Item = (N, Box<dyn Schema>)>>(iter: I) -> Self {
        iter.into_iter()
            .fold(Shape::new(), |shape, (name, schema)| shape.boxed_field(name, schema))
    }
}

/// Validates a JSON object field-by-field against a [`Shape`].
#[derive(Debug)]
pub struct ObjectSchema {
    kind: SchemaKind,
    shape: Shape,
    message: String,
}

impl ObjectSchema {
    /// An `object` composer with the default message.
    pub fn object(shape: Shape) -> Self {
        Self {
            kind: SchemaKind::Object,
            shape,
            message: DEFAULT_OBJECT_MESSAGE.to_string(),
        }
    }

    /// A `record` composer with the default message, as used by the
    /// environment entry point.
    pub fn record(shape: Shape) -> Self {
        Self {
            kind: SchemaKind::Record,
            shape,
            message: DEFAULT_RECORD_MESSAGE.to_string(),
        }
    }

    /// Replace the message reported for non-object input.
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    /// Visit the fields after `pending` settles, awaiting each in order.
    async fn finish_deferred<'a>(
        &'a self,
        record: &'a Map<String, Value>,
        pending: (&'a str, futures::future::BoxFuture<'a, Outcome<Value>>),
        rest: &'a [Field],
        mut assembly: Assembly,
    ) -> Outcome<Value> {
        let (name, future) = pending;
        assembly.absorb(name, future.await);
        for field in rest {
            let input = record.get(&field.name).unwrap_or(&ABSENT);
            let outcome = field.schema.validate(input).settle().await;
            assembly.absorb(&field.name, outcome);
        }
        assembly.finish()
    }
}

impl Schema for ObjectSchema {
    fn kind(&self) -> SchemaKind {
        self.kind
    }

    fn message(&self) -> &str {
        &self.message
    }

    fn validate<'a>(&'a self, input: &'a Value) -> Validation<'a> {
        let Some(record) = input.as_object() else {
            return Validation::Ready(Outcome::fail(self.message.as_str()));
        };

        let mut assembly = Assembly::default();
        let fields = self.shape.fields.as_slice();
        for (index, field) in fields.iter().enumerate() {
            let value = record.get(&field.name).unwrap_or(&ABSENT);
            match field.schema.validate(value) {
                Validation::Ready(outcome) => assembly.absorb(&field.name, outcome),
                Validation::Deferred(future) => {
                    let rest = fields.get(index + 1..).unwrap_or_default();
                    return Validation::Deferred(Box::pin(self.finish_deferred(
                        record,
                        (field.name.as_str(), future),
                        rest,
                        assembly,
                    )));
                }
            }
        }
        Validation::Ready(assembly.finish())
    }
}

/// Output record and issues gathered while walking a shape.
#[derive(Debug, Default)]
struct Assembly {
    output: Map<String, Value>,
    issues: Vec<Issue>,
}

impl Assembly {
    fn absorb(&mut self, key: &str, outcome: Outcome<Value>) {
        match outcome {
            Outcome::Success { value } => {
                self.output.insert(key.to_string(), value);
            }
            Outcome::Failure { issues } => {
                self.issues
                    .extend(issues.into_iter().map(|issue| issue.within(key)));
            }
        }
    }

    fn finish(self) -> Outcome<Value> {
        if self.issues.is_empty() {
            Outcome::success(Value::Object(self.output))
        } else {
            Outcome::failure(self.issues)
        }
    }
}
