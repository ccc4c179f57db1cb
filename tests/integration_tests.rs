use std::fs;
use std::path::{Path, PathBuf};

use actix_web::{test, web, App};
use serde_json::json;
use tempfile::TempDir;

use rust_mipcl::domain::solver_factory::create_default_factory;
use rust_mipcl::domain::solvers::MIPCL_EXECUTABLE;
use rust_mipcl::handlers::{configure, json_config, AppState};
use rust_mipcl::services::{ExecutableRegistry, Services, TempfileManager};

struct Workspace {
    dir: TempDir,
}

impl Workspace {
    fn new() -> Self {
        Workspace {
            dir: tempfile::tempdir().expect("Failed to create temp dir"),
        }
    }

    fn path(&self) -> &Path {
        self.dir.path()
    }

    fn write(&self, name: &str, contents: &str) -> PathBuf {
        let path = self.path().join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&path, contents).unwrap();
        path
    }

    /// App state with an empty search path; `mipcl` resolves only when given
    fn state(&self, mipcl: Option<&Path>) -> web::Data<AppState> {
        let services = Services::new(
            ExecutableRegistry::new(Vec::new()),
            TempfileManager::new(self.path()),
        );
        if let Some(path) = mipcl {
            services
                .registry
                .register_executable_path(MIPCL_EXECUTABLE, path);
        }
        web::Data::new(AppState::new(create_default_factory(services), false))
    }
}

macro_rules! init_app {
    ($state:expr) => {
        test::init_service(
            App::new()
                .app_data($state)
                .app_data(json_config(1024 * 1024))
                .configure(configure),
        )
        .await
    };
}

#[actix_web::test]
async fn test_health_endpoint() {
    let workspace = Workspace::new();
    let app = init_app!(workspace.state(None));

    let req = test::TestRequest::get().uri("/health").to_request();
    let body = test::call_and_read_body(&app, req).await;
    assert_eq!(body, "OK");
}

#[actix_web::test]
async fn test_solvers_endpoint_lists_mipcl_plugins() {
    let workspace = Workspace::new();
    let app = init_app!(workspace.state(None));

    let req = test::TestRequest::get().uri("/solvers").to_request();
    let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;

    let aliases: Vec<&str> = body["solvers"]
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["alias"].as_str().unwrap())
        .collect();
    assert!(aliases.contains(&"mipcl"));
    assert!(aliases.contains(&"_mipcl_shell"));
    assert!(aliases.contains(&"_mock_mipcl"));
}

#[actix_web::test]
async fn test_command_builds_mipcl_command_line() {
    let workspace = Workspace::new();
    let mipcl = workspace.write("bin/mps_mipcl", "");
    let problem = workspace.write("model.mps", "NAME model\n");
    let app = init_app!(workspace.state(Some(&mipcl)));

    // Raw body so the option order on the wire is exactly as written
    let body = format!(
        r#"{{"solver": "mipcl", "options": {{"foo": null, "bar": 2, "blank": " "}}, "timelimit": 30, "problem_files": [{}]}}"#,
        serde_json::to_string(&problem).unwrap()
    );
    let req = test::TestRequest::post()
        .uri("/command")
        .insert_header(("content-type", "application/json"))
        .set_payload(body)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(
        body["cmd"],
        json!([mipcl.to_string_lossy(), "--foo", "--bar", "2", "--blank", "-time", "30"])
    );
    assert!(body["log_file"]
        .as_str()
        .unwrap()
        .ends_with(".mipcl.log"));
    assert!(body["env"].is_null());
}

#[actix_web::test]
async fn test_command_with_unknown_io_mode() {
    let workspace = Workspace::new();
    let problem = workspace.write("model.mps", "NAME model\n");
    let app = init_app!(workspace.state(None));

    let req = test::TestRequest::post()
        .uri("/command")
        .set_json(json!({
            "solver": "mipcl",
            "solver_io": "python",
            "problem_files": [problem]
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 400);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert!(body["error"].as_str().unwrap().contains("python"));
}

#[actix_web::test]
async fn test_command_without_executable_is_unavailable() {
    let workspace = Workspace::new();
    let problem = workspace.write("model.mps", "NAME model\n");
    let app = init_app!(workspace.state(None));

    let req = test::TestRequest::post()
        .uri("/command")
        .set_json(json!({ "problem_files": [problem] }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 503);
}

#[actix_web::test]
async fn test_unknown_solver_alias() {
    let workspace = Workspace::new();
    let problem = workspace.write("model.mps", "NAME model\n");
    let app = init_app!(workspace.state(None));

    let req = test::TestRequest::post()
        .uri("/solve")
        .set_json(json!({ "solver": "cplex", "problem_files": [problem] }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 400);
}

#[actix_web::test]
async fn test_solve_with_mock_solver() {
    let workspace = Workspace::new();
    let problem = workspace.write("model.mps", "NAME model\n");
    workspace.write("mipcl/model.out", "MIPCL mock run\n");
    let app = init_app!(workspace.state(None));

    let req = test::TestRequest::post()
        .uri("/solve")
        .set_json(json!({
            "solver": "_mock_mipcl",
            "options": {"foo": "bar"},
            "problem_files": [problem]
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);

    let body: serde_json::Value = test::read_body_json(resp).await;
    let solver = &body["results"]["solver"];
    assert_eq!(solver["return_code"], 0);
    assert_eq!(solver["status"], "unknown");
    assert_eq!(solver["name"], "mipcl");
    assert_eq!(body["results"]["solutions"], json!([]));
}

#[actix_web::test]
async fn test_solve_with_missing_problem_file() {
    let workspace = Workspace::new();
    let app = init_app!(workspace.state(None));

    let req = test::TestRequest::post()
        .uri("/solve")
        .set_json(json!({
            "solver": "_mock_mipcl",
            "problem_files": [workspace.path().join("absent.mps")]
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 400);
}

#[actix_web::test]
async fn test_solve_invalid_json() {
    let workspace = Workspace::new();
    let app = init_app!(workspace.state(None));

    let req = test::TestRequest::post()
        .uri("/solve")
        .insert_header(("content-type", "application/json"))
        .set_payload("invalid json")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 400);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert!(body["error"].is_string());
}

#[actix_web::test]
async fn test_nonexistent_endpoint() {
    let workspace = Workspace::new();
    let app = init_app!(workspace.state(None));

    let req = test::TestRequest::get().uri("/nonexistent").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 404);
}
