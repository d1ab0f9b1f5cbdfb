pub mod compile;
pub mod error;
pub mod event;
pub mod resource;

pub use compile::{CompileRequest, CompiledMethods};
pub use error::{CompileError, ConfigurationError};
pub use event::{
    AuthorizerRef, CorsDeclaration, FunctionDefinition, HttpEventSpec, PassthroughBehavior,
    RequestOptions, ResponseOptions,
};
pub use resource::MethodResource;
