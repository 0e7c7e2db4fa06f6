use crate::{ColumnDefinition, DialectOptions, Type};
use parking_lot::RwLock;
use std::{
    any::{TypeId, type_name},
    fmt::{self, Debug},
    mem::size_of_val,
    sync::Arc,
};

/// Factory turning a column definition into a custom type.
///
/// Returning `None` passes the column on to the next factory, and eventually to the built-in
/// types of the dialect.
pub trait TypeFactory: Send + Sync + 'static {
    fn from_definition(
        &self,
        definition: &ColumnDefinition,
        options: &DialectOptions,
    ) -> Option<Type>;

    fn name(&self) -> &'static str {
        type_name::<Self>()
    }

    /// Type of a zero-sized factory (fn item, closure without captures, unit struct), whose
    /// values are all the same factory.
    fn unit_type(&self) -> Option<TypeId> {
        (size_of_val(self) == 0).then(TypeId::of::<Self>)
    }
}

impl<F> TypeFactory for F
where
    F: Fn(&ColumnDefinition, &DialectOptions) -> Option<Type> + Send + Sync + 'static,
{
    fn from_definition(
        &self,
        definition: &ColumnDefinition,
        options: &DialectOptions,
    ) -> Option<Type> {
        self(definition, options)
    }
}

/// Ordered stack of custom type factories owned by a dialect.
///
/// Resolution walks the stack from the most recently registered factory to the oldest.
#[derive(Default)]
pub struct TypeRegistry {
    entries: RwLock<Vec<Arc<dyn TypeFactory>>>,
}

impl TypeRegistry {
    pub fn new() -> Self {
        Default::default()
    }

    /// Pushes `factory` on top of the stack.
    pub fn register<F: TypeFactory>(&self, factory: F) -> bool {
        self.register_shared(Arc::new(factory))
    }

    /// Pushes `factory` on top of the stack. Returns `false` when the same factory is already
    /// registered: the same instance, or any value of a zero-sized factory type.
    pub fn register_shared(&self, factory: Arc<dyn TypeFactory>) -> bool {
        let unit_type = factory.unit_type();
        let mut entries = self.entries.write();
        if entries.iter().any(|v| {
            Arc::ptr_eq(v, &factory) || (unit_type.is_some() && v.unit_type() == unit_type)
        }) {
            log::debug!("Type factory {} is already registered", factory.name());
            return false;
        }
        entries.push(factory);
        true
    }

    pub fn reset(&self) {
        self.entries.write().clear();
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    /// First type produced by a factory, newest first.
    pub fn resolve(
        &self,
        definition: &ColumnDefinition,
        options: &DialectOptions,
    ) -> Option<Type> {
        let factories: Vec<_> = self.entries.read().iter().rev().cloned().collect();
        factories.into_iter().find_map(|factory| {
            let result = factory.from_definition(definition, options);
            if result.is_some() {
                log::trace!(
                    "Column {} resolved by the registered type {}",
                    definition.column_name,
                    factory.name()
                );
            }
            result
        })
    }
}

impl Debug for TypeRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.entries.read().iter().map(|v| v.name()))
            .finish()
    }
}
