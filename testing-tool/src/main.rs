use anyhow::{anyhow, Context, Result};
use colored::*;
use reqwest::{Client, Response};
use serde::Deserialize;
use serde_json::{json, Value};
use std::io::{self, Write};

const DEFAULT_BASE_URL: &str = "http://127.0.0.1:3000/api/v2";

#[derive(Debug, Deserialize)]
struct Envelope {
    status: String,
    message: String,
    #[serde(default)]
    data: Value,
    #[serde(default)]
    meta: Value,
    #[serde(default)]
    info: Option<String>,
}

struct Session {
    client: Client,
    base_url: String,
    token: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    println!("{}", "🚗 Carpool API Testing Tool".bright_blue().bold());
    println!("{}", "=====================================".bright_blue());
    println!();

    let base_url = std::env::var("CARPOOL_API_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
    println!("{} {}", "🌐 API:".bright_blue(), base_url);

    // Paso 1: Crear cuenta de conductor y autenticarse
    let client = Client::new();
    let username = prompt("Username: ")?;
    let password = prompt("Password (min 8): ")?;
    let token = signup_and_login(&client, &base_url, &username, &password).await?;

    let session = Session {
        client,
        base_url,
        token,
    };

    // Paso 2: Menú principal
    loop {
        println!();
        println!("{}", "📋 MENÚ PRINCIPAL".bright_green().bold());
        println!("{}", "==================".bright_green());
        println!("1. 🚗 Ofrecer un viaje");
        println!("2. 🔍 Listar viajes disponibles");
        println!("3. 🔄 Marcar un viaje como tomado/cancelado");
        println!("4. 🚪 Salir");

        match prompt("Selecciona una opción (1-4): ")?.as_str() {
            "1" => offer_ride(&session).await?,
            "2" => list_rides(&session).await?,
            "3" => update_ride(&session).await?,
            "4" => {
                println!("{}", "👋 ¡Hasta luego!".bright_green());
                break;
            }
            _ => println!("{}", "❌ Opción inválida. Intenta de nuevo.".bright_red()),
        }
    }

    Ok(())
}

fn prompt(label: &str) -> Result<String> {
    print!("{}", label.bright_yellow());
    io::stdout().flush()?;
    let mut value = String::new();
    io::stdin().read_line(&mut value)?;
    Ok(value.trim().to_string())
}

async fn read_envelope(response: Response) -> Result<(u16, Envelope)> {
    let status = response.status().as_u16();
    let envelope = response
        .json::<Envelope>()
        .await
        .context("La respuesta no tiene el formato esperado")?;
    Ok((status, envelope))
}

fn print_envelope(status: u16, envelope: &Envelope) {
    let header = format!("[{}] {} - {}", status, envelope.status, envelope.message);
    if envelope.status == "success" {
        println!("{}", header.bright_green());
    } else {
        println!("{}", header.bright_red());
        if let Some(info) = &envelope.info {
            println!("   ℹ️  {}", info);
        }
    }
}

async fn signup_and_login(client: &Client, base_url: &str, username: &str, password: &str) -> Result<String> {
    println!();
    println!("{}", "🔐 REGISTRANDO CONDUCTOR...".bright_cyan().bold());

    let signup = json!({
        "username": username,
        "name": username,
        "gender": "other",
        "usertype": "driver",
        "email": format!("{}@carpool.test", username),
        "password": password,
        "contacts": "0712345678"
    });
    let response = client.post(format!("{}/auth/signup", base_url)).json(&signup).send().await?;
    let (status, envelope) = read_envelope(response).await?;
    print_envelope(status, &envelope);
    if status == 409 {
        println!("{}", "⚠️  La cuenta ya existe, se intenta login".bright_yellow());
    }

    let login = json!({ "username": username, "password": password });
    let response = client.post(format!("{}/auth/login", base_url)).json(&login).send().await?;
    let (status, envelope) = read_envelope(response).await?;
    print_envelope(status, &envelope);

    envelope.data["access_token"]
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| anyhow!("Login fallido: {}", envelope.message))
}

async fn offer_ride(session: &Session) -> Result<()> {
    let departure = (chrono::Local::now().naive_local() + chrono::Duration::days(7))
        .format("%b %d %Y %I:%M%p")
        .to_string();

    let payload = json!({
        "departure": departure,
        "origin": prompt("Origen: ")?,
        "destination": prompt("Destino: ")?,
        "cost": 350,
        "vehicle_number_plate": "KBC-A21",
        "capacity": 3
    });

    println!("{}", "📦 Payload:".bright_blue());
    println!("{}", serde_json::to_string_pretty(&payload)?);

    let response = session
        .client
        .post(format!("{}/rides", session.base_url))
        .bearer_auth(&session.token)
        .json(&payload)
        .send()
        .await?;
    let location = response
        .headers()
        .get(reqwest::header::LOCATION)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    let (status, envelope) = read_envelope(response).await?;
    print_envelope(status, &envelope);

    if let Some(location) = location {
        println!("📍 Location: {}", location);
    }
    Ok(())
}

async fn list_rides(session: &Session) -> Result<()> {
    let response = session.client.get(format!("{}/rides", session.base_url)).send().await?;
    let (status, envelope) = read_envelope(response).await?;
    print_envelope(status, &envelope);

    println!("🚗 Viajes visibles: {}", envelope.meta["rides"]);
    for ride in envelope.data.as_array().into_iter().flatten() {
        println!(
            "   #{} {} -> {} | {} | {} plazas",
            ride["rideId"], ride["origin"], ride["destination"], ride["departure"], ride["capacity"]
        );
    }
    Ok(())
}

async fn update_ride(session: &Session) -> Result<()> {
    let ride_id = prompt("Id del viaje: ")?;
    let status = prompt("Nuevo estado (taken/cancelled): ")?;

    let response = session
        .client
        .put(format!("{}/rides/{}", session.base_url, ride_id))
        .bearer_auth(&session.token)
        .json(&json!({ "status": status }))
        .send()
        .await?;
    let (code, envelope) = read_envelope(response).await?;
    print_envelope(code, &envelope);
    Ok(())
}
