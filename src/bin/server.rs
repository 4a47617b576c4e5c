//! Study room presence server.
//!
//! Tracks each participant's focus/rest status and accumulated study time per
//! room and keeps every connected client's membership view in sync.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin server
//! cargo run --bin server -- --host 0.0.0.0 --port 3000
//! ```

use std::{collections::HashMap, sync::Arc};

use clap::Parser;
use tokio::sync::Mutex;

use mokumoku::{
    common::{logger::setup_logger, time::get_jst_timestamp},
    domain::{RoomRegistry, Timestamp},
    infrastructure::{
        message_pusher::WebSocketEventPusher, repository::InMemoryRegistryRepository,
        study_record::LogStudyRecordSink,
    },
    ui::Server,
    usecase::{
        ConnectParticipantUseCase, CreateRoomUseCase, DisconnectParticipantUseCase,
        GetRoomDetailUseCase, GetRoomsUseCase, JoinRoomUseCase, UpdateStatusUseCase,
    },
};

#[derive(Parser, Debug)]
#[command(name = "server")]
#[command(about = "Study room presence server with live membership broadcast", long_about = None)]
struct Args {
    /// Host address to bind the server to
    #[arg(short = 'H', long, default_value = "127.0.0.1")]
    host: String,

    /// Port number to bind the server to
    #[arg(short = 'p', long, default_value = "8080")]
    port: u16,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), "debug");

    let args = Args::parse();

    // Initialize dependencies in order:
    // 1. Registry repository
    // 2. EventPusher
    // 3. StudyRecordSink
    // 4. UseCases
    // 5. Server

    // 1. Create Registry (in-memory, seeded with the default room)
    let registry = Arc::new(Mutex::new(RoomRegistry::new(Timestamp::new(
        get_jst_timestamp(),
    ))));
    tracing::info!(
        "Registry created with default room '{}'",
        registry.lock().await.rooms()[0].name.as_str()
    );
    let repository = Arc::new(InMemoryRegistryRepository::new(registry));

    // 2. Create EventPusher (WebSocket implementation)
    let pusher_clients = Arc::new(Mutex::new(HashMap::new()));
    let event_pusher = Arc::new(WebSocketEventPusher::new(pusher_clients));

    // 3. Create StudyRecordSink (log-based, fire-and-forget)
    let record_sink = Arc::new(LogStudyRecordSink::new());

    // 4. Create UseCases
    let connect_participant_usecase = Arc::new(ConnectParticipantUseCase::new(
        repository.clone(),
        event_pusher.clone(),
    ));
    let disconnect_participant_usecase = Arc::new(DisconnectParticipantUseCase::new(
        repository.clone(),
        event_pusher.clone(),
        record_sink,
    ));
    let create_room_usecase = Arc::new(CreateRoomUseCase::new(
        repository.clone(),
        event_pusher.clone(),
    ));
    let join_room_usecase = Arc::new(JoinRoomUseCase::new(
        repository.clone(),
        event_pusher.clone(),
    ));
    let update_status_usecase = Arc::new(UpdateStatusUseCase::new(
        repository.clone(),
        event_pusher.clone(),
    ));
    let get_rooms_usecase = Arc::new(GetRoomsUseCase::new(repository.clone()));
    let get_room_detail_usecase = Arc::new(GetRoomDetailUseCase::new(repository.clone()));

    // 5. Create and run the server
    let server = Server::new(
        connect_participant_usecase,
        disconnect_participant_usecase,
        create_room_usecase,
        join_room_usecase,
        update_status_usecase,
        get_rooms_usecase,
        get_room_detail_usecase,
    );
    if let Err(e) = server.run(args.host, args.port).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
