use actix_web::http::StatusCode;
use actix_web::{web, HttpResponse, Responder, ResponseError};

use crate::convert::{to_solver_kwds, to_solver_listings};
use crate::domain::solver::Solver;
use crate::domain::solver_factory::SolverFactory;
use crate::domain::validate::{validate_problem_files, validate_timelimit};
use crate::error::SolverError;
use crate::models::{SolveRequest, SolveResponse, SolverListResponse};

/// Shared state handed to every route
pub struct AppState {
    pub factory: SolverFactory,
    pub keepfiles: bool,
}

impl AppState {
    pub fn new(factory: SolverFactory, keepfiles: bool) -> Self {
        AppState { factory, keepfiles }
    }
}

impl ResponseError for SolverError {
    fn status_code(&self) -> StatusCode {
        match self {
            SolverError::UnknownIo(_)
            | SolverError::UnknownSolver(_)
            | SolverError::UnsupportedFormat { .. }
            | SolverError::InvalidInput(_)
            | SolverError::MissingMockData(_) => StatusCode::BAD_REQUEST,
            SolverError::Unavailable { .. } => StatusCode::SERVICE_UNAVAILABLE,
            SolverError::Application(_)
            | SolverError::ExecutionFailed { .. }
            | SolverError::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(serde_json::json!({ "error": self.to_string() }))
    }
}

fn create_solver(state: &AppState, req: &SolveRequest) -> Result<Box<dyn Solver>, SolverError> {
    if !state.factory.contains(&req.solver) {
        return Err(SolverError::UnknownSolver(req.solver.clone()));
    }
    state
        .factory
        .create(&req.solver, to_solver_kwds(req, state.keepfiles))
        .ok_or_else(|| {
            SolverError::InvalidInput(format!(
                "Unable to create solver '{}' with IO mode '{}'",
                req.solver,
                req.solver_io.as_deref().unwrap_or("default")
            ))
        })
}

fn validate_solve_request(req: &SolveRequest) -> Result<(), SolverError> {
    validate_problem_files(&req.problem_files)?;
    validate_timelimit(req.timelimit)
}

async fn run_blocking<T, F>(f: F) -> Result<T, SolverError>
where
    F: FnOnce() -> Result<T, SolverError> + Send + 'static,
    T: Send + 'static,
{
    web::block(f)
        .await
        .map_err(|e| SolverError::Application(e.to_string()))?
}

/// POST /command
pub async fn command(
    state: web::Data<AppState>,
    req: web::Json<SolveRequest>,
) -> Result<HttpResponse, SolverError> {
    let req = req.into_inner();
    validate_solve_request(&req)?;

    let state = state.into_inner();
    let command = run_blocking(move || {
        let mut solver = create_solver(&state, &req)?;
        solver.create_command(&req.problem_files)
    })
    .await?;

    Ok(HttpResponse::Ok().json(command))
}

/// POST /solve
pub async fn solve(
    state: web::Data<AppState>,
    req: web::Json<SolveRequest>,
) -> Result<HttpResponse, SolverError> {
    let req = req.into_inner();
    validate_solve_request(&req)?;

    let state = state.into_inner();
    let results = run_blocking(move || {
        let mut solver = create_solver(&state, &req)?;
        solver.solve(&req.problem_files)
    })
    .await?;

    Ok(HttpResponse::Ok().json(SolveResponse { results }))
}

/// GET /solvers
pub async fn solvers(state: web::Data<AppState>) -> impl Responder {
    HttpResponse::Ok().json(SolverListResponse {
        solvers: to_solver_listings(&state.factory),
    })
}

/// GET /health
pub async fn health_check() -> impl Responder {
    HttpResponse::Ok().body("OK")
}

/// JSON body settings with errors reported as `{"error": ...}`
pub fn json_config(limit: usize) -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(limit)
        .error_handler(|err, _| {
            let err_string = err.to_string();
            actix_web::error::InternalError::from_response(
                err,
                HttpResponse::BadRequest().json(serde_json::json!({ "error": err_string })),
            )
            .into()
        })
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health_check))
        .route("/solvers", web::get().to(solvers))
        .route("/command", web::post().to(command))
        .route("/solve", web::post().to(solve));
}
