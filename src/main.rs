mod cli;
mod config;
mod platform;
mod registre;
mod sensors;

use std::sync::{Arc, Mutex};
use std::time::Duration;

use clap::Parser;
use tokio_stream::StreamExt;
use tokio_util::sync::CancellationToken;

use crate::config::Config;
use crate::platform::Platform;

#[cfg(unix)]
use tokio::signal::unix::SignalKind;
use tokio::signal::{self};

#[cfg(feature = "fake-sensors")]
use crate::platform::fake::FakePlatform;

#[cfg(feature = "real-sensors")]
use crate::platform::raspberry::RaspberryPlatform;

#[tokio::main]
async fn main() {
    let args = cli::Cli::parse();
    let token = CancellationToken::new();

    // Configuration de l'acquisition (offsets hard-iron fixes, ODR choisi)
    let mut config = Config::new();
    config.odr_hz = args.odr;

    // Sélection de la plateforme : bus I2C réel ou capteur simulé
    #[cfg(feature = "real-sensors")]
    let plateforme: Arc<Mutex<dyn Platform + Send>> = match RaspberryPlatform::new(args.bus) {
        Ok(p) => Arc::new(Mutex::new(p)),
        Err(e) => {
            panic!("[PLATFORM] Erreur d'accès au bus: {}", e);
        }
    };

    #[cfg(feature = "fake-sensors")]
    let plateforme: Arc<Mutex<dyn Platform + Send>> = Arc::new(Mutex::new(FakePlatform::new()));

    // MAG
    {
        let token = token.child_token();
        let mut reader =
            match sensors::mag::reader::Reader::new(plateforme.clone(), config.clone(), token.clone()) {
                Ok(reader) => reader,
                Err(e) => {
                    panic!("[MAG] Erreur d'initialisation: {}", e);
                }
            };

        tokio::spawn(async move {
            while !token.is_cancelled() {
                if let Some(data) = reader.next().await {
                    if let Err(e) = data {
                        eprintln!("[MAG] Erreur de lecture: {}", e);
                    }

                    // dbg!("[MAG] {}", data);
                }

                tokio::time::sleep(Duration::from_millis(100)).await;
            }
        });
    }

    #[cfg(unix)]
    {
        let mut test = tokio::signal::unix::signal(SignalKind::interrupt()).unwrap();
        tokio::select! {
            _ = test.recv() => {
                println!("Signal d'interruption reçu");
                token.cancel();
            },
            _ = signal::ctrl_c() => {
                println!("Signal de contrôle C reçu");
                token.cancel();
            },
        }
    }

    #[cfg(not(unix))]
    {
        tokio::select! {
            _ = signal::ctrl_c() => {
                println!("Signal de contrôle C reçu");
                token.cancel();
            },
        }
    }
}
