//! Test doubles shared by unit tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;

use crate::Result;
use crate::auth::{Session, SignIn, SignInExchange};
use crate::error::AuthError;

/// Issues tokens `t1`, `t2`, ... and counts exchanges.
#[derive(Default)]
pub(crate) struct CountingExchange {
    pub(crate) sign_ins: AtomicUsize,
    pub(crate) sign_outs: AtomicUsize,
    pub(crate) reject: bool,
}

impl CountingExchange {
    pub(crate) fn sign_ins(&self) -> usize {
        self.sign_ins.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SignInExchange for CountingExchange {
    async fn sign_in(&self, sign_in: &SignIn) -> Result<Session> {
        let n = self.sign_ins.fetch_add(1, Ordering::SeqCst) + 1;
        // Widen the window in which concurrent callers overlap.
        tokio::time::sleep(Duration::from_millis(20)).await;
        if self.reject {
            return Err(AuthError::SignInRejected {
                status: 404,
                message: None,
            }
            .into());
        }
        Ok(Session::new(sign_in.clone(), format!("t{n}")))
    }

    async fn sign_out(&self, _session: &Session) -> Result<()> {
        self.sign_outs.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

pub(crate) fn alice() -> SignIn {
    SignIn::new("api", "alice@example.org", "P4ssword")
}

pub(crate) fn bob() -> SignIn {
    SignIn::new("api", "bob@example.org", "P4ssword")
}
