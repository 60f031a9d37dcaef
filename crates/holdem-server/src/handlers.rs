//! HTTP handlers for the six engine operations (§6.1). Each delegates
//! straight to the matching `Engine` method and lets `?` turn an
//! `EngineError` into the matching HTTP status via `ApiError`.
use crate::caller::CallerId;
use crate::error::ApiError;
use actix_web::HttpResponse;
use actix_web::Responder;
use actix_web::web;
use holdem_dto::CreateTableRequest;
use holdem_dto::EndHandRequest;
use holdem_dto::JoinTableRequest;
use holdem_dto::LeaveTableRequest;
use holdem_dto::PlayerActionRequest;
use holdem_dto::StartGameRequest;
use holdem_engine::Engine;
use holdem_store::LedgerStore;
use holdem_store::TableStore;

pub async fn create_table<S, L>(
    engine: web::Data<Engine<S, L>>,
    caller: CallerId,
    body: web::Json<CreateTableRequest>,
) -> Result<impl Responder, ApiError>
where
    S: TableStore + 'static,
    L: LedgerStore + 'static,
{
    let response = engine.create_table(caller.as_str(), body.into_inner()).await?;
    Ok(HttpResponse::Ok().json(response))
}

pub async fn join_table<S, L>(
    engine: web::Data<Engine<S, L>>,
    caller: CallerId,
    body: web::Json<JoinTableRequest>,
) -> Result<impl Responder, ApiError>
where
    S: TableStore + 'static,
    L: LedgerStore + 'static,
{
    let response = engine.join_table(caller.as_str(), body.into_inner()).await?;
    Ok(HttpResponse::Ok().json(response))
}

pub async fn leave_table<S, L>(
    engine: web::Data<Engine<S, L>>,
    caller: CallerId,
    body: web::Json<LeaveTableRequest>,
) -> Result<impl Responder, ApiError>
where
    S: TableStore + 'static,
    L: LedgerStore + 'static,
{
    let response = engine.leave_table(caller.as_str(), body.into_inner()).await?;
    Ok(HttpResponse::Ok().json(response))
}

pub async fn start_game<S, L>(
    engine: web::Data<Engine<S, L>>,
    caller: CallerId,
    body: web::Json<StartGameRequest>,
) -> Result<impl Responder, ApiError>
where
    S: TableStore + 'static,
    L: LedgerStore + 'static,
{
    let response = engine.start_game(caller.as_str(), body.into_inner()).await?;
    Ok(HttpResponse::Ok().json(response))
}

pub async fn player_action<S, L>(
    engine: web::Data<Engine<S, L>>,
    caller: CallerId,
    body: web::Json<PlayerActionRequest>,
) -> Result<impl Responder, ApiError>
where
    S: TableStore + 'static,
    L: LedgerStore + 'static,
{
    let response = engine.player_action(caller.as_str(), body.into_inner()).await?;
    Ok(HttpResponse::Ok().json(response))
}

/// `endHand` takes no caller identity (§6.1) -- it is invoked by the
/// showdown scheduler as a crash-recovery safety net, not by a seated
/// player, so no `CallerId` extractor is required here.
pub async fn end_hand<S, L>(
    engine: web::Data<Engine<S, L>>,
    body: web::Json<EndHandRequest>,
) -> Result<impl Responder, ApiError>
where
    S: TableStore + 'static,
    L: LedgerStore + 'static,
{
    let response = engine.end_hand(body.into_inner()).await?;
    Ok(HttpResponse::Ok().json(response))
}

pub async fn health() -> impl Responder {
    HttpResponse::Ok().body("ok")
}

#[cfg(test)]
mod tests {
    use actix_web::App;
    use actix_web::http::StatusCode;
    use actix_web::test;
    use actix_web::web;
    use holdem_dto::CreateTableRequest;
    use holdem_dto::JoinTableRequest;
    use holdem_engine::Engine;
    use holdem_store::MemoryLedgerStore;
    use holdem_store::MemoryTableStore;
    use std::sync::Arc;

    fn app_data() -> web::Data<Engine<MemoryTableStore, MemoryLedgerStore>> {
        let store = MemoryTableStore::shared();
        let ledger = Arc::new(MemoryLedgerStore::new());
        web::Data::new(Engine::new(store, ledger))
    }

    #[actix_web::test]
    async fn health_is_ok_without_a_caller_header() {
        let app = test::init_service(App::new().route("/health", web::get().to(super::health))).await;
        let req = test::TestRequest::get().uri("/health").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
    }

    #[actix_web::test]
    async fn create_table_without_a_player_id_header_is_unauthenticated() {
        let data = app_data();
        let app = test::init_service(
            App::new()
                .app_data(data.clone())
                .route("/api/createTable", web::post().to(super::create_table::<MemoryTableStore, MemoryLedgerStore>)),
        )
        .await;
        let req = test::TestRequest::post()
            .uri("/api/createTable")
            .set_json(CreateTableRequest::default())
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn create_then_join_round_trips_through_http() {
        let data = app_data();
        let app = test::init_service(
            App::new().app_data(data.clone()).service(
                web::scope("/api")
                    .route("/createTable", web::post().to(super::create_table::<MemoryTableStore, MemoryLedgerStore>))
                    .route("/joinTable", web::post().to(super::join_table::<MemoryTableStore, MemoryLedgerStore>)),
            ),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/createTable")
            .insert_header(("X-Player-Id", "alice"))
            .set_json(CreateTableRequest::default())
            .to_request();
        let created: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        let table_id = created["tableId"].as_str().unwrap().to_string();

        let req = test::TestRequest::post()
            .uri("/api/joinTable")
            .insert_header(("X-Player-Id", "bob"))
            .set_json(JoinTableRequest { table_id: holdem_core::TableId::parse(&table_id).unwrap(), buy_in_amount: 100 })
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
    }
}
