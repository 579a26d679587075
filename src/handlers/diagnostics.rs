use axum::{extract::State, Json};
use chrono::Utc;
use std::sync::{Mutex, OnceLock};
use sysinfo::System;
use tracing::info;

use crate::models::DiagnosticsResponse;
use crate::state::AppState;

static SYSTEM_MONITOR: OnceLock<Mutex<System>> = OnceLock::new();

/// Document, room and connection counts plus process resource usage
pub async fn diagnostics(State(state): State<AppState>) -> Json<DiagnosticsResponse> {
    let n_docs = state.store.len() as u32;
    let n_rooms = state.hub.room_count() as u32;
    let n_conn = state.hub.connection_count() as u32;

    let (cpu_usage, memory_alloc, memory_free, memory_total) = {
        let sys_lock = SYSTEM_MONITOR.get_or_init(|| {
            Mutex::new(System::new_all())
        });
        match sys_lock.lock() {
            Ok(mut sys) => {
                sys.refresh_cpu();
                sys.refresh_memory();
                (
                    sys.global_cpu_info().cpu_usage(),
                    sys.used_memory(),
                    sys.free_memory(),
                    sys.total_memory(),
                )
            }
            Err(_) => (0.0, 0, 0, 0)
        }
    };

    info!(
        "Diagnostics: CPU: {:.2}%, Mem: {}/{} MB, Docs: {}, Rooms: {}, Conn: {}",
        cpu_usage,
        memory_alloc / 1024 / 1024,
        memory_total / 1024 / 1024,
        n_docs,
        n_rooms,
        n_conn
    );

    Json(DiagnosticsResponse {
        service: state.service_name.clone(),
        started_at: state.started_at.to_rfc3339(),
        uptime_secs: (Utc::now() - state.started_at).num_seconds(),
        n_docs,
        n_rooms,
        n_conn,
        cpu_usage,
        memory_alloc,
        memory_total,
        memory_free,
    })
}
