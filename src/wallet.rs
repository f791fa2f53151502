use std::sync::RwLock;

use crate::chain::MoveCall;
use crate::error::{AppError, Result};

/// Digest returned once a transaction has been signed and executed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionDigest(pub String);

fn random_digest() -> TransactionDigest {
    let bytes: [u8; 32] = rand::random();
    TransactionDigest(format!("0x{}", hex::encode(bytes)))
}

/// Boundary to whatever wallet the user connected.
#[async_trait::async_trait]
pub trait WalletProvider: Send + Sync {
    /// Address of the connected account, if any.
    fn current_account(&self) -> Option<String>;

    async fn sign_and_execute(&self, call: &MoveCall) -> Result<TransactionDigest>;
}

/// In-process wallet: connect/disconnect by hand, executions are recorded.
#[derive(Debug, Default)]
pub struct DevWallet {
    account: RwLock<Option<String>>,
    executed: RwLock<Vec<MoveCall>>,
}

impl DevWallet {
    pub fn new(account: Option<String>) -> Self {
        Self {
            account: RwLock::new(account),
            executed: RwLock::new(Vec::new()),
        }
    }

    pub fn connect(&self, address: impl Into<String>) {
        let address = address.into();
        match self.account.write() {
            Ok(mut guard) => {
                tracing::info!("Wallet connected: {}", address);
                *guard = Some(address);
            }
            Err(_) => tracing::warn!("Wallet state poisoned; ignoring connect to {}", address),
        }
    }

    pub fn disconnect(&self) {
        match self.account.write() {
            Ok(mut guard) => {
                tracing::info!("Wallet disconnected");
                *guard = None;
            }
            Err(_) => tracing::warn!("Wallet state poisoned; ignoring disconnect"),
        }
    }

    pub fn executed(&self) -> Vec<MoveCall> {
        self.executed
            .read()
            .map(|guard| guard.clone())
            .unwrap_or_default()
    }
}

#[async_trait::async_trait]
impl WalletProvider for DevWallet {
    fn current_account(&self) -> Option<String> {
        self.account.read().ok().and_then(|guard| guard.clone())
    }

    async fn sign_and_execute(&self, call: &MoveCall) -> Result<TransactionDigest> {
        let Some(sender) = self.current_account() else {
            return Err(AppError::WalletNotConnected);
        };

        let digest = random_digest();
        tracing::info!(
            "Executed {} from {} (digest {})",
            call.target,
            sender,
            digest.0
        );
        self.executed
            .write()
            .map_err(|_| AppError::Wallet("execution log poisoned".to_string()))?
            .push(call.clone());
        Ok(digest)
    }
}
