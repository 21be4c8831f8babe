use actix_web::{HttpResponse, Responder, post, web};

use crate::adapters::web::schema::{AuthRequest, AuthResponse};
use crate::use_cases::authenticate::AuthenticateUseCase;
use crate::use_cases::dto::AuthenticateCommand;

#[post("/api/auth")]
pub async fn authenticate(
	payload: web::Json<AuthRequest>,
	authenticate_use_case: web::Data<AuthenticateUseCase>,
) -> impl Responder {
	let command = match payload.into_inner() {
		AuthRequest::AccessToken { access_token } => {
			AuthenticateCommand::AccessToken(access_token)
		}
		AuthRequest::Identity { uid, username } => {
			AuthenticateCommand::Identity { uid, username }
		}
	};

	HttpResponse::Ok().json(AuthResponse {
		success: true,
		user:    authenticate_use_case.execute(command),
	})
}
