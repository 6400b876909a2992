use std::net::SocketAddr;
use std::path::Path;

use crate::config::Config;
use crate::entity::{NewNote, Note, NoteId};
use crate::error::{NotesError, Result};
use crate::http::NotesServer;
use crate::service::{validate_new_note, NotesService};
use crate::storage::open_store;

use super::commands::StorageArgs;

/// Resolve configuration: defaults, then the YAML file, then flags/env.
pub fn load_config(path: Option<&Path>, storage: &StorageArgs) -> Result<Config> {
    let mut config = Config::load(path)?;
    if let Some(ref data_dir) = storage.data_dir {
        config.storage.data_dir = data_dir.clone();
    }
    if let Some(backend) = storage.backend {
        config.storage.backend = backend;
    }
    Ok(config)
}

/// Apply `serve` overrides: `--bind`/`NOTES_BIND` replaces the address, then
/// `--port`/`PORT` replaces only its port.
pub fn resolve_bind_addr(
    config: &mut Config,
    bind: Option<String>,
    port: Option<u16>,
) -> Result<SocketAddr> {
    if let Some(bind) = bind {
        config.server.bind = bind;
    }
    if let Some(port) = port {
        config.set_port(port)?;
    }
    config.bind_addr()
}

pub fn handle_serve(mut config: Config, bind: Option<String>, port: Option<u16>) -> Result<()> {
    let addr = resolve_bind_addr(&mut config, bind, port)?;

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;

    runtime.block_on(async move {
        let store = open_store(&config.storage)?;
        let service = NotesService::new(store);
        let handle = NotesServer::bind(addr, service).await?.serve()?;
        println!("Listening on http://{}", handle.local_addr());

        let token = handle.shutdown_token();
        tokio::spawn(async move {
            wait_for_shutdown_signal().await;
            tracing::info!("shutdown signal received");
            token.cancel();
        });

        handle.wait().await
    })
}

async fn wait_for_shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};
        match (signal(SignalKind::terminate()), signal(SignalKind::interrupt())) {
            (Ok(mut sigterm), Ok(mut sigint)) => {
                tokio::select! {
                    _ = sigterm.recv() => {}
                    _ = sigint.recv() => {}
                }
            }
            _ => {
                let _ = tokio::signal::ctrl_c().await;
            }
        }
    }
    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
    }
}

pub fn handle_list(config: &Config, json: bool) -> Result<()> {
    let store = open_store(&config.storage)?;
    let notes = store.find_all()?;

    if json {
        println!("{}", serde_json::to_string_pretty(&notes)?);
    } else if notes.is_empty() {
        println!("No notes found.");
    } else {
        for note in &notes {
            print_note_line(note);
        }
    }

    Ok(())
}

pub fn handle_add(config: &Config, content: String, important: bool, json: bool) -> Result<()> {
    let valid = validate_new_note(NewNote::new(content, important))?;
    let store = open_store(&config.storage)?;
    let note = store.insert(valid)?;
    store.flush()?;

    if json {
        println!("{}", serde_json::to_string_pretty(&note)?);
    } else {
        println!("Created note {}", note.id);
    }

    Ok(())
}

pub fn handle_get(config: &Config, id: String, json: bool) -> Result<()> {
    let id = NoteId::parse(&id)?;
    let store = open_store(&config.storage)?;
    let note = store
        .find_by_id(&id)?
        .ok_or_else(|| NotesError::NotFound(id.to_string()))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&note)?);
    } else {
        println!("ID:        {}", note.id);
        println!("Important: {}", if note.important { "yes" } else { "no" });
        println!("Date:      {}", note.date.format("%Y-%m-%d %H:%M"));
        println!();
        println!("{}", note.content);
    }

    Ok(())
}

pub fn handle_delete(config: &Config, id: String) -> Result<()> {
    let id = NoteId::parse(&id)?;
    let store = open_store(&config.storage)?;
    store.delete_by_id(&id)?;
    store.flush()?;

    println!("Deleted note {}", id);
    Ok(())
}

fn print_note_line(note: &Note) {
    let id = note.id.to_string();
    let marker = if note.important { "*" } else { " " };
    println!("  {} ({}) {}", marker, &id[..8], note.content);
}
