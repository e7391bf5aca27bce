//! Session middleware.

use std::sync::Arc;

use salvo::{http::header::HeaderValue, prelude::*};
use tracing::{debug, warn};

use crate::{
    sessions::{SESSION_ID_HEADER, SessionId},
    state::State,
};

/// Attach a session to the request and echo its id back to the client.
#[salvo::handler]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    let sessions = match depot.obtain::<Arc<State>>() {
        Ok(state) => Arc::clone(&state.sessions),
        Err(_error) => {
            res.render(StatusError::internal_server_error());

            return;
        }
    };

    let requested = req
        .header::<String>(SESSION_ID_HEADER)
        .and_then(|value| value.parse::<SessionId>().ok());

    let handle = sessions.resolve(requested).await;

    match HeaderValue::from_str(&handle.id().to_string()) {
        Ok(value) => {
            res.headers_mut().insert(SESSION_ID_HEADER, value);
        }
        Err(source) => warn!("could not encode session id for response header: {source}"),
    }

    depot.inject(handle.clone());

    ctrl.call_next(req, depot, res).await;

    if handle.lock().await.session.take_modified() {
        debug!(session = %handle.id(), "session updated");
    }
}
