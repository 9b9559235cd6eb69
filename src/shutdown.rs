use axum::Extension;
use std::{
	error::Error,
	fmt::{self, Display},
	future::Future,
	sync::atomic::{AtomicBool, Ordering},
};
use tokio::{signal, sync::mpsc};

#[derive(Debug, PartialEq, Eq)]
pub struct AlreadyCreatedError;

impl Error for AlreadyCreatedError {}

impl Display for AlreadyCreatedError {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str("shutdown handler already created")
	}
}

static CREATED: AtomicBool = AtomicBool::new(false);

/// Owns the shutdown channel the server's graceful-shutdown future waits on.
/// Termination signals and the `/shutdown` route both feed into it.
#[derive(Debug)]
pub struct Shutdown {
	sender: mpsc::Sender<()>,
	receiver: mpsc::Receiver<()>,
}

/// Cloneable handle handed to request handlers for requesting termination.
#[derive(Debug, Clone)]
pub struct Agent {
	sender: mpsc::Sender<()>,
}

impl Agent {
	pub async fn start(&self) {
		tracing::info!("Shutdown requested");
		self.sender.send(()).await.ok();
	}
}

impl Shutdown {
	/// Install the signal handlers. Only one instance may exist per process.
	///
	/// # Errors
	///
	/// Returns an error if a shutdown handler was already created.
	pub fn new() -> Result<Self, AlreadyCreatedError> {
		if CREATED.swap(true, Ordering::SeqCst) {
			return Err(AlreadyCreatedError);
		}

		let (tx, rx) = mpsc::channel(1);

		let tx_for_signals = tx.clone();
		tokio::spawn(async move {
			termination_signal().await;
			tx_for_signals.send(()).await.ok();
		});

		Ok(Self {
			sender: tx,
			receiver: rx,
		})
	}

	pub fn handle(&mut self) -> impl Future<Output = ()> + '_ {
		let signal = self.receiver.recv();

		async move {
			signal.await;
		}
	}

	pub fn extension(&self) -> Extension<Agent> {
		Extension(Agent {
			sender: self.sender.clone(),
		})
	}
}

async fn termination_signal() {
	let ctrl_c = async {
		signal::ctrl_c()
			.await
			.expect("failed to install Ctrl+C handler");
	};

	#[cfg(unix)]
	let terminate = async {
		signal::unix::signal(signal::unix::SignalKind::terminate())
			.expect("failed to install signal handler")
			.recv()
			.await;
	};

	#[cfg(not(unix))]
	let terminate = std::future::pending::<()>();

	tokio::select! {
		() = ctrl_c => {},
		() = terminate => {},
	}

	tracing::info!("Received shutdown signal");
}
