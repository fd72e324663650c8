//! Minimal interactive chat-room client.
//!
//! Usage: `room_cli [BASE_URL] [USER_ID]`
//!
//! Plain input sends a message to the selected room (participants only);
//! slash commands drive everything else. Type /help for the list.

use anyhow::Result;
use tokio::io::{AsyncBufReadExt, BufReader};

use parley_client::{ApiClient, Message, Notice, RoomView, ViewHandler};

struct Printer;

impl ViewHandler for Printer {
    fn on_notice(&mut self, notice: Notice) {
        match notice {
            Notice::Success(text) => println!("* {text}"),
            Notice::Warning(text) => println!("! {text}"),
            Notice::Error(text) => println!("!! {text}"),
        }
    }

    fn on_messages_replaced(&mut self, messages: &[Message]) {
        for message in messages {
            println!("  {}: {}", message.sender.username, message.content);
        }
    }
}

fn print_rooms(view: &RoomView<ApiClient, Printer>) {
    for (index, room) in view.rooms().enumerate() {
        println!(
            "{index}. {} (by {}, {} joined)",
            room.name,
            room.creator.username,
            room.participants.len()
        );
    }
}

fn print_help() {
    println!("/rooms           list rooms");
    println!("/refresh         re-fetch the room list");
    println!("/select N        open room N and show its messages");
    println!("/join /leave     join or leave the selected room");
    println!("/delete          delete the selected room (creator only)");
    println!("/create NAME     create a room");
    println!("/quit            exit");
    println!("anything else    send it to the selected room");
}

#[tokio::main]
async fn main() -> Result<()> {
    let base_url = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "http://127.0.0.1:8080".to_string());
    let user_id = std::env::args().nth(2).unwrap_or_else(|| "u1".to_string());

    let api = ApiClient::new(base_url).with_user(user_id);
    let mut view = RoomView::new(api, Printer);
    view.load().await;

    match view.current_user() {
        Some(user) => println!("Hello, {}", user.username),
        None => println!("Warning: not logged in; is the server running?"),
    }
    print_rooms(&view);
    println!("Type /help for commands");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let (command, rest) = match line.split_once(' ') {
            Some((command, rest)) => (command, rest.trim()),
            None => (line, ""),
        };

        match command {
            "/help" => print_help(),
            "/rooms" => print_rooms(&view),
            "/refresh" => {
                view.refresh_rooms().await;
                print_rooms(&view);
            }
            "/select" => {
                let id = rest
                    .parse::<usize>()
                    .ok()
                    .and_then(|index| view.rooms().nth(index).map(|room| room.id.clone()));
                match id {
                    Some(id) => {
                        view.select_room(&id).await;
                        if let Some(room) = view.selected_room() {
                            println!("-- {} --", room.name);
                        }
                    }
                    None => println!("No such room; try /rooms"),
                }
            }
            "/join" => view.join().await,
            "/leave" => view.leave().await,
            "/delete" => view.delete().await,
            "/create" => view.create_room(rest).await,
            "/quit" => break,
            _ if command.starts_with('/') => println!("Unknown command; try /help"),
            _ => {
                if view.selected_room().is_none() {
                    println!("Select a room first (/rooms, /select N)");
                    continue;
                }
                view.set_draft(line);
                view.press_enter().await;
                if !view.draft().is_empty() {
                    println!("Join the room to send a message (/join)");
                }
            }
        }
    }

    Ok(())
}
