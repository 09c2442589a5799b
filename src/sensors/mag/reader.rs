use std::pin::Pin;
use std::sync::{Arc, Mutex};
use std::task::Poll;
use std::thread;
use std::time::Duration;

use anyhow::anyhow;
use futures::Stream;
use tokio_util::sync::CancellationToken;

use crate::config::Config;
use crate::platform::Platform;
use crate::sensors::mag::lis2mdl::Lis2mdl;
use crate::sensors::mag::MAGData;

/// Cadence de re-sondage du flag data-ready, plus rapide que l'ODR maximal
const PERIODE_POLL_MS: u64 = 10;

pub(crate) struct Reader {
    data: Arc<Mutex<anyhow::Result<MAGData>>>,
    token: CancellationToken,
}

impl Reader {
    /// Déroule la séquence de bring-up puis démarre le thread de polling.
    /// Une panne de bring-up (capteur absent, reset bloqué) est retournée
    /// immédiatement : c'est à l'appelant de décider de la suite.
    pub(crate) fn new(
        platform: Arc<Mutex<dyn Platform + Send>>,
        config: Config,
        token: CancellationToken,
    ) -> anyhow::Result<Self> {
        let mag = Lis2mdl::new(&config);

        {
            let p = &mut *platform.lock().unwrap();
            mag.init_module(p)?;
        }

        // Donnée du capteur
        let data: Arc<Mutex<anyhow::Result<MAGData>>> = Arc::new(Mutex::new(Err(anyhow!("NOINIT"))));
        let data_thread = data.clone();

        let thread_token = token.clone();

        let reader = Reader { data, token };

        println!("[MAG] Démarrage du thread ...");
        thread::spawn(move || {
            while !thread_token.is_cancelled() {
                {
                    // Verrouille la plateforme le temps d'un cycle
                    let p = &mut *platform.lock().unwrap();

                    match mag.poll_once(p) {
                        Ok(Some(mesure)) => *data_thread.lock().unwrap() = Ok(mesure),
                        Ok(None) => {}
                        Err(e) => *data_thread.lock().unwrap() = Err(e),
                    }
                }

                thread::sleep(Duration::from_millis(PERIODE_POLL_MS));
            }

            println!("[MAG] Fin du thread.");
        });

        Ok(reader)
    }
}

impl Stream for Reader {
    type Item = anyhow::Result<MAGData>;

    fn poll_next(
        self: Pin<&mut Self>,
        _cx: &mut std::task::Context<'_>,
    ) -> Poll<Option<Self::Item>> {
        if self.token.is_cancelled() {
            return Poll::Ready(None);
        }

        let data = match self.data.lock().unwrap().as_ref() {
            Ok(val) => Poll::Ready(Some(Ok(*val))),
            Err(e) => Poll::Ready(Some(Err(anyhow!("{}", e)))),
        };

        data
    }
}
