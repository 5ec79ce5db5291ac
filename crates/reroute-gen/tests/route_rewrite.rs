//! End-to-end behavior of the route rewriting passes

use reroute_gen::{
    Allocator, GenError, ParseOptions, RouteTarget, SERVER_ONLY_ROUTE_EXPORTS, generate,
    module_exports, parse, remove_exports, transform_route, transform_route_module,
};

fn print(source: &str) -> String {
    let allocator = Allocator::default();
    let parsed = parse(&allocator, source, ParseOptions::tsx()).unwrap();
    generate(&parsed.program, None).code
}

fn remove(source: &str, names: &[&str]) -> Result<String, GenError> {
    let allocator = Allocator::default();
    let mut parsed = parse(&allocator, source, ParseOptions::tsx())?;
    remove_exports(&mut parsed.program, names)?;
    Ok(generate(&parsed.program, None).code)
}

const MODULE: &str = r#"
import { helper } from "./helper";
const local = () => helper();
export const meta = () => [];
export function links() { return []; }
export default function Page() { return local(); }
"#;

#[test]
fn empty_removal_set_is_identity() {
    assert_eq!(remove(MODULE, &[]).unwrap(), print(MODULE));
}

#[test]
fn disjoint_removal_set_is_identity() {
    assert_eq!(remove(MODULE, SERVER_ONLY_ROUTE_EXPORTS).unwrap(), print(MODULE));
}

#[test]
fn removing_server_exports_keeps_default() {
    let source = r#"
        export const loader = async () => ({ user: 1 });
        export async function action() {}
        export const headers = () => ({});
        export default function Page() { return null; }
    "#;
    let code = remove(source, SERVER_ONLY_ROUTE_EXPORTS).unwrap();
    assert!(!code.contains("loader"));
    assert!(!code.contains("action"));
    assert!(!code.contains("headers"));
    assert!(code.contains("export default function Page()"));
}

#[test]
fn destructured_loader_is_rejected() {
    let err = remove(
        "export const { loader, other } = fetchStuff();",
        SERVER_ONLY_ROUTE_EXPORTS,
    )
    .unwrap_err();
    assert!(matches!(err, GenError::InvalidDestructure { ref name } if name == "loader"));
}

#[test]
fn default_function_round_trip() {
    let allocator = Allocator::default();
    let mut parsed = parse(
        &allocator,
        "export default function App() { return null; }",
        ParseOptions::tsx(),
    )
    .unwrap();
    assert!(transform_route(&allocator, &mut parsed.program));

    let code = generate(&parsed.program, None).code;
    assert_eq!(code.matches("import ").count(), 1);
    assert!(code.contains(
        "import { withComponentProps as _withComponentProps } from \"virtual/react-router/with-props\";"
    ));
    assert!(code.contains("export default _withComponentProps(function App() {"));
}

#[test]
fn route_module_pipeline_for_both_targets() {
    let source = r#"
        import { getUser } from "./session.server";
        export const loader = () => getUser();
        export const clientLoader = () => null;
        export function ErrorBoundary() { return null; }
        export default function Profile() { return null; }
    "#;
    let id = "/project/app/routes/profile.tsx?react-router-route";

    let browser = transform_route_module(source, id, RouteTarget::Browser).unwrap();
    assert!(!browser.code.contains("session.server"));
    assert_eq!(
        module_exports(&browser.code, id).unwrap(),
        vec!["clientLoader", "ErrorBoundary", "default"]
    );

    let server = transform_route_module(source, id, RouteTarget::Server).unwrap();
    assert!(server.code.contains("session.server"));
    assert_eq!(
        module_exports(&server.code, id).unwrap(),
        vec!["loader", "clientLoader", "ErrorBoundary", "default"]
    );
}
