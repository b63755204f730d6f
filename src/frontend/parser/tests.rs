use super::*;

fn parse(source: &str) -> Program {
    let mut parser = Parser::new(source);
    parser.parse_program().unwrap()
}

#[test]
fn parse_imports_with_and_without_prefix() {
    let program = parse("import ballerina/http;\nimport ballerina/lang.value as val;");
    assert_eq!(program.imports.len(), 2);
    assert_eq!(program.imports[0].org.as_deref(), Some("ballerina"));
    assert_eq!(program.imports[0].effective_prefix(), "http");
    assert_eq!(program.imports[1].module, "lang.value");
    assert_eq!(program.imports[1].effective_prefix(), "val");
}

#[test]
fn parse_service_class_with_type_reference() {
    let program = parse(
        r#"
service class RequestInterceptor {
    *http:RequestInterceptor;

    resource function 'default [string... path](http:RequestContext ctx)
            returns http:NextService|error? {
        return ctx.next();
    }
}
"#,
    );
    assert_eq!(program.classes.len(), 1);
    let class = &program.classes[0];
    assert_eq!(class.name, "RequestInterceptor");
    assert_eq!(class.qualifiers.as_slice(), &[Qualifier::Service]);
    assert_eq!(class.type_refs.len(), 1);
    assert_eq!(class.type_refs[0].text(), "http:RequestInterceptor");
    assert_eq!(class.type_refs[0].span.line, 3);

    let function = &class.functions[0];
    assert!(function.is_resource());
    match &function.kind {
        FunctionKind::Resource { accessor, path, .. } => {
            assert_eq!(accessor, "default");
            assert_eq!(path.text(), "[string... path]");
        }
        FunctionKind::Plain => panic!("expected resource function"),
    }
    assert_eq!(function.params.len(), 1);
    assert_eq!(function.params[0].ty.text(), "http:RequestContext");
    assert_eq!(function.params[0].name.as_deref(), Some("ctx"));
    assert_eq!(
        function.return_type.as_ref().map(TypeExpr::text).as_deref(),
        Some("http:NextService|error?")
    );
}

#[test]
fn parse_remote_function_with_error_parameter() {
    let program = parse(
        r#"
service class ErrorInterceptor {
    *http:ResponseErrorInterceptor;
    remote function interceptResponseError(error err, http:Response res) returns http:NextService? {
        return;
    }
}
"#,
    );
    let function = &program.classes[0].functions[0];
    assert!(!function.is_resource());
    assert!(function.has_qualifier(Qualifier::Remote));
    assert_eq!(function.name, "interceptResponseError");
    assert!(matches!(function.params[0].ty.kind, TypeExprKind::Error(None)));
    assert_eq!(function.params[1].ty.text(), "http:Response");
}

#[test]
fn parse_fields_annotations_and_defaults() {
    let program = parse(
        r#"
isolated service class Counter {
    private int count = 0;
    final map<string> headers = {};

    @display { label: "hook" }
    public function init(int start = 10, string... names) {
        self.count = start;
    }
}
"#,
    );
    let class = &program.classes[0];
    assert_eq!(
        class.qualifiers.as_slice(),
        &[Qualifier::Isolated, Qualifier::Service]
    );
    assert_eq!(class.fields.len(), 2);
    assert_eq!(class.fields[1].ty.text(), "map<string>");
    let init = &class.functions[0];
    assert_eq!(init.params.len(), 2);
    assert!(init.params[1].rest);
}

#[test]
fn parse_skips_unrelated_top_level_items() {
    let program = parse(
        r#"
import ballerina/http;

listener http:Listener ep = new (9090);

type Payload record {|
    string id;
|};

service /hello on ep {
    resource function get greeting() returns string {
        return "hi";
    }
}

public function main() {
    int x = 1;
}

service class Only {
}
"#,
    );
    assert_eq!(program.imports.len(), 1);
    assert_eq!(program.classes.len(), 1);
    assert_eq!(program.classes[0].name, "Only");
    assert_eq!(program.type_defs.len(), 1);
    assert_eq!(program.type_defs[0].name, "Payload");
    assert_eq!(program.type_defs[0].kind, TypeDefKind::Record);
}

#[test]
fn parse_type_definition_kinds() {
    let program = parse(
        r#"
public type Greeter client object {
    remote function greet() returns string;
};
type Id string|int;
type Pair record { int a; int b; };
"#,
    );
    let kinds: Vec<_> = program
        .type_defs
        .iter()
        .map(|def| (def.name.as_str(), def.kind))
        .collect();
    assert_eq!(
        kinds,
        vec![
            ("Greeter", TypeDefKind::Object),
            ("Id", TypeDefKind::Other),
            ("Pair", TypeDefKind::Record),
        ]
    );
}

#[test]
fn parse_resource_path_with_params() {
    let program = parse(
        "service class S { resource function get users/[int id]/posts(http:Caller caller) {} }",
    );
    match &program.classes[0].functions[0].kind {
        FunctionKind::Resource { accessor, path, .. } => {
            assert_eq!(accessor, "get");
            assert_eq!(path.text(), "users/[int id]/posts");
        }
        FunctionKind::Plain => panic!("expected resource function"),
    }
}

#[test]
fn parse_root_resource_path() {
    let program = parse("service class S { resource function post .() {} }");
    match &program.classes[0].functions[0].kind {
        FunctionKind::Resource { path, .. } => assert_eq!(path.text(), "."),
        FunctionKind::Plain => panic!("expected resource function"),
    }
}

#[test]
fn functions_get_distinct_node_ids() {
    let program = parse(
        "service class S { function a() {} function b() {} }\nclass T { function c() {} }",
    );
    let ids: Vec<_> = program
        .classes
        .iter()
        .flat_map(|c| c.functions.iter().map(|f| f.id))
        .collect();
    assert_eq!(ids, vec![NodeId(0), NodeId(1), NodeId(2)]);
}

#[test]
fn unterminated_class_body_is_an_error() {
    let mut parser = Parser::new("service class S {\n  function a() {}\n");
    let err = parser.parse_program().unwrap_err();
    assert!(matches!(err.error, ParserError::ExpectedToken { .. }));
}

#[test]
fn missing_type_is_reported() {
    let mut parser = Parser::new("service class S { function a(, int x) {} }");
    let err = parser.parse_program().unwrap_err();
    assert!(matches!(err.error, ParserError::ExpectedType { .. }));
}

#[test]
fn unterminated_top_level_block_is_reported() {
    let mut parser = Parser::new("public function main() {\n  int x = 1;\n");
    let err = parser.parse_program().unwrap_err();
    assert!(matches!(err.error, ParserError::UnterminatedBlock { .. }));
}

#[test]
fn lexer_errors_are_available_after_parse() {
    let mut parser = Parser::new("function main() { int x = $; }\nservice class S {}");
    let program = parser.parse_program().unwrap();
    assert_eq!(program.classes.len(), 1);
    let errors = parser.take_lexer_errors();
    assert_eq!(errors.len(), 1);
}
