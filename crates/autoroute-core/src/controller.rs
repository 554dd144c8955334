//! The [`Controller`] trait.
//!
//! A controller exposes its descriptor and the ordered list of its public
//! methods, each paired with a typed invoker. This replaces runtime
//! reflection: everything the registrar needs is produced once, usually by
//! the `#[controller]` attribute macro.
//!
//! ```rust,ignore
//! use autoroute::prelude::*;
//!
//! struct UserController;
//!
//! #[controller(request = Request, response = Response, output = Reply)]
//! impl UserController {
//!     pub fn get_user_action(&self, req: Request, res: Response, id: u64) -> Reply {
//!         // ...
//!     }
//! }
//! ```

use std::fmt;

use crate::descriptor::{ActionMethod, ControllerDescriptor};
use crate::dispatch::BoundArgs;
use crate::error::DispatchResult;

/// Typed call into one controller method.
///
/// Receives the controller, both handles and the path values already bound
/// to the method's parameters in declaration order.
pub type Invoker<C> = fn(
    &C,
    <C as Controller>::Request,
    <C as Controller>::Response,
    BoundArgs,
) -> DispatchResult<<C as Controller>::Output>;

/// A controller whose routes are derived from its method names.
pub trait Controller: Send + Sync + Sized + 'static {
    /// Request handle passed to every action.
    type Request;
    /// Response handle passed to every action.
    type Response;
    /// Value returned by every action.
    type Output;

    /// Identity and routing conventions.
    fn descriptor() -> ControllerDescriptor;

    /// Public methods in declaration order.
    fn actions() -> Vec<Action<Self>>;
}

/// One public method and its invoker.
pub struct Action<C: Controller> {
    pub method: ActionMethod,
    pub invoke: Invoker<C>,
}

impl<C: Controller> Action<C> {
    pub fn new(method: ActionMethod, invoke: Invoker<C>) -> Self {
        Self { method, invoke }
    }
}

impl<C: Controller> Clone for Action<C> {
    fn clone(&self) -> Self {
        Self {
            method: self.method.clone(),
            invoke: self.invoke,
        }
    }
}

impl<C: Controller> fmt::Debug for Action<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Action")
            .field("method", &self.method)
            .finish_non_exhaustive()
    }
}
