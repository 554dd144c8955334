use autoroute::core::{CallableRef, DispatchError, FLOAT_PATTERN, RouterError};
use autoroute::prelude::*;

#[derive(Debug, Clone, PartialEq)]
pub struct Request {
    pub user: &'static str,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Response {
    pub status: u16,
}

#[derive(Default)]
pub struct UserController {
    greeting: String,
}

#[controller(output = String)]
impl UserController {
    pub fn get_user_action(&self, req: Request, res: Response, id: u64) -> String {
        format!("{} {} #{id} ({})", self.greeting, req.user, res.status)
    }

    pub fn post_action(
        &self,
        req: Request,
        _res: Response,
        amount: f64,
        note: Option<String>,
    ) -> String {
        format!("{} paid {amount} [{}]", req.user, note.unwrap_or_default())
    }

    // Handles may come after path parameters.
    pub fn delete_item_action(&self, id: u64, res: Response) -> String {
        format!("deleted {id} ({})", res.status)
    }

    pub fn helper_internal(&self) -> String {
        String::new()
    }

    #[allow(dead_code)]
    fn get_private_action(&self) -> String {
        String::new()
    }
}

pub struct Blog;

#[controller(
    request = Request,
    response = Response,
    output = String,
    name = "ArticleController",
    fixed_prefix = "blog",
    suffix = "Route",
    name_patterns(slug = "[a-z-]+"),
)]
impl Blog {
    pub fn get_post_route(&self, slug: String, _req: Request) -> String {
        format!("post {slug}")
    }

    pub fn patch_tags_route(&self, id: u32, tag: Option<String>) -> String {
        format!("tags {id} {tag:?}")
    }

    // Contains a verb but not the suffix.
    pub fn get_action(&self) -> String {
        String::new()
    }
}

type Router = MemoryRouter<Request, Response, String>;

fn req() -> Request {
    Request { user: "ada" }
}

fn res() -> Response {
    Response { status: 200 }
}

fn user_controller() -> UserController {
    UserController {
        greeting: "hello".to_string(),
    }
}

#[test]
fn generated_descriptor_and_actions() {
    let descriptor = UserController::descriptor();
    assert_eq!(descriptor.name, "UserController");
    assert_eq!(descriptor.options.action_suffix, "Action");

    let names: Vec<_> = UserController::actions()
        .into_iter()
        .map(|a| a.method.name)
        .collect();
    assert_eq!(names, ["getUserAction", "postAction", "deleteItemAction"]);
}

#[test]
fn derives_conventional_routes() {
    let registrar = Registrar::new();
    let mut router = Router::new();
    registrar.register(user_controller(), &mut router).unwrap();

    let routes: Vec<_> = router
        .routes()
        .iter()
        .map(|r| (r.verb, r.template.as_str()))
        .collect();
    let post = format!("/user/{{amount:{FLOAT_PATTERN}}}[/{{note}}]");
    assert_eq!(
        routes,
        [
            (HttpVerb::Get, "/user-user/{id:[0-9]+}"),
            (HttpVerb::Post, post.as_str()),
            (HttpVerb::Delete, "/user-item/{id:[0-9]+}"),
        ]
    );
}

#[test]
fn records_callables() {
    let registrar = Registrar::new();
    let mut router = Router::new();
    registrar.register(user_controller(), &mut router).unwrap();

    let records = registrar.registry().records();
    assert_eq!(records.len(), 3);
    assert_eq!(
        records[0].callable,
        CallableRef::for_target("UserController", "getUserAction")
    );
    assert_eq!(
        records[0].callable.to_string(),
        "UserController:callRouteMethodGetUserAction"
    );
    assert!(records.iter().all(|r| r.method_name != "helperInternal"));

    let json: serde_json::Value =
        serde_json::from_str(&registrar.registry().to_json().unwrap()).unwrap();
    assert_eq!(json[1]["httpMethod"], "POST");
    assert_eq!(json[1]["methodName"], "postAction");
}

#[test]
fn dispatch_binds_named_values_in_declared_order() {
    let registrar = Registrar::new();
    let mut router = Router::new();
    registrar.register(user_controller(), &mut router).unwrap();

    let template = format!("/user/{{amount:{FLOAT_PATTERN}}}[/{{note}}]");
    let out = router
        .dispatch(
            HttpVerb::Post,
            &template,
            req(),
            res(),
            PathArgs::new().with("note", "rent").with("amount", "12.5"),
        )
        .unwrap();
    assert_eq!(out, "ada paid 12.5 [rent]");

    let out = router
        .dispatch(
            HttpVerb::Post,
            &template,
            req(),
            res(),
            PathArgs::new().with("amount", "3"),
        )
        .unwrap();
    assert_eq!(out, "ada paid 3 []");

    let out = router
        .dispatch(
            HttpVerb::Delete,
            "/user-item/{id:[0-9]+}",
            req(),
            res(),
            PathArgs::new().with_positional("9"),
        )
        .unwrap();
    assert_eq!(out, "deleted 9 (200)");
}

#[test]
fn dispatch_conversion_errors() {
    let registrar = Registrar::new();
    let mut router = Router::new();
    registrar.register(user_controller(), &mut router).unwrap();

    let err = router
        .dispatch(
            HttpVerb::Get,
            "/user-user/{id:[0-9]+}",
            req(),
            res(),
            PathArgs::new().with("id", "abc"),
        )
        .unwrap_err();
    assert!(matches!(
        err,
        RouterError::Dispatch(DispatchError::InvalidArgument { ref name, .. }) if name == "id"
    ));

    let err = router
        .dispatch(
            HttpVerb::Get,
            "/user-user/{id:[0-9]+}",
            req(),
            res(),
            PathArgs::new(),
        )
        .unwrap_err();
    assert_eq!(
        err,
        RouterError::Dispatch(DispatchError::MissingArgument {
            name: "id".to_string()
        })
    );
}

#[test]
fn unresolvable_entry_has_no_side_effect() {
    let registrar = Registrar::new();
    let mut router = Router::new();
    let trampoline = registrar.register(user_controller(), &mut router).unwrap();

    let err = trampoline
        .call("callRouteMethodHelperInternal", req(), res(), PathArgs::new())
        .unwrap_err();
    assert_eq!(
        err.to_string(),
        "bad dispatch target: callRouteMethodHelperInternal method does not exist on controller [UserController]"
    );
    assert_eq!(registrar.registry().len(), 3);

    let out = trampoline
        .call(
            "callRouteMethodGetUserAction",
            req(),
            res(),
            PathArgs::new().with("id", "1"),
        )
        .unwrap();
    assert_eq!(out, "hello ada #1 (200)");
}

#[test]
fn attribute_options() {
    let descriptor = Blog::descriptor();
    assert_eq!(descriptor.name, "ArticleController");
    assert_eq!(descriptor.options.action_suffix, "Route");

    let registrar = Registrar::new();
    let mut router = Router::new();
    registrar.register(Blog, &mut router).unwrap();

    let routes: Vec<_> = router
        .routes()
        .iter()
        .map(|r| (r.verb, r.template.as_str()))
        .collect();
    assert_eq!(
        routes,
        [
            (HttpVerb::Get, "/blog/{slug:[a-z-]+}"),
            (HttpVerb::Patch, "/blog-tags/{id:[0-9]+}[/{tag}]"),
        ]
    );

    let out = router
        .dispatch(
            HttpVerb::Get,
            "/blog/{slug:[a-z-]+}",
            req(),
            res(),
            PathArgs::new().with("slug", "hello-world"),
        )
        .unwrap();
    assert_eq!(out, "post hello-world");
}

#[test]
fn route_app_mounts_generated_controllers() {
    let mut app = RouteApp::new(Router::new());
    app.mount(user_controller()).unwrap();
    app.mount(Blog).unwrap();

    assert_eq!(app.stats().controllers, 2);
    assert_eq!(app.stats().routes, 5);
    assert_eq!(app.registry().for_controller("ArticleController").len(), 2);
    assert!(matches!(
        app.mount(UserController::default()),
        Err(RuntimeError::AlreadyMounted(_))
    ));
}
