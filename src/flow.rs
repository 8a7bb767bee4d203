// The five-stage run: ping, login, reference lookup, tender creation and
// status check. Stages run strictly in order and the first failure ends
// the run; nothing is retried.

use chrono::NaiveDateTime;
use tracing::info;

use crate::api::{session_cookie_pair, TenderClient};
use crate::config::Credentials;
use crate::error::StageError;
use crate::models::{TenderDetails, TenderRequest};
use crate::schedule::TenderSchedule;
use crate::ui;

/// What a successful run leaves behind.
#[derive(Debug)]
pub struct RunOutcome {
    pub tender_id: String,
    pub details: TenderDetails,
}

/// Walk the whole tender flow for an order placed at `now`.
pub fn run(
    client: &mut TenderClient,
    credentials: &Credentials,
    now: NaiveDateTime,
) -> Result<RunOutcome, StageError> {
    check_access(client)?;
    authenticate(client, credentials)?;
    let request = prepare_tender(client, now)?;
    let tender_id = create_tender(client, &request)?;
    let details = check_status(client, &tender_id)?;
    Ok(RunOutcome { tender_id, details })
}

fn check_access(client: &TenderClient) -> Result<(), StageError> {
    ui::stage(1, "Checking API access", &client.endpoint("test/ping"));
    let spinner = ui::spinner("Pinging...");
    let res = client.ping();
    spinner.finish_and_clear();
    res.map_err(StageError::Ping)?;
    ui::note("API is reachable");
    info!("stage 1 complete");
    Ok(())
}

fn authenticate(client: &mut TenderClient, credentials: &Credentials) -> Result<(), StageError> {
    ui::stage(2, "Logging in", &client.endpoint("account/login"));
    let spinner = ui::spinner("Logging in...");
    let res = client.login(&credentials.login, &credentials.password);
    spinner.finish_and_clear();
    let set_cookie = res.map_err(StageError::Login)?;
    ui::note("login succeeded");

    let set_cookie = set_cookie
        .filter(|c| !session_cookie_pair(c).is_empty())
        .ok_or(StageError::MissingCookie)?;
    client
        .set_session_cookie(session_cookie_pair(&set_cookie))
        .map_err(StageError::Login)?;
    info!(login = %credentials.login, "stage 2 complete, session cookie stored");
    Ok(())
}

/// Stage 3 plus the request body for stage 4.
fn prepare_tender(client: &TenderClient, now: NaiveDateTime) -> Result<TenderRequest, StageError> {
    ui::stage(3, "Fetching reference data for a new tender", &client.endpoint("tender/create"));
    let spinner = ui::spinner("Loading reference data...");
    let res = client.reference_catalog();
    spinner.finish_and_clear();
    let catalog = res.map_err(StageError::Reference)?;

    let customer = catalog.first_customer().ok_or(StageError::MissingReference)?;
    info!(company = %customer.company_id, contact = %customer.contact_id, "stage 3 complete");

    let schedule = TenderSchedule::from_order_time(now);
    Ok(TenderRequest::example(customer, &schedule))
}

fn create_tender(client: &TenderClient, request: &TenderRequest) -> Result<String, StageError> {
    ui::stage(4, "Creating tender", &client.endpoint("tender/create"));
    let spinner = ui::spinner("Creating tender...");
    let res = client.create_tender(request);
    spinner.finish_and_clear();
    let tender_id = res.map_err(StageError::Create)?;
    ui::note(format!("created tender Id={}", tender_id));
    info!(%tender_id, "stage 4 complete");
    Ok(tender_id)
}

fn check_status(client: &TenderClient, tender_id: &str) -> Result<TenderDetails, StageError> {
    ui::stage(5, "Checking tender status", &client.endpoint(&format!("tender/{}", tender_id)));
    let spinner = ui::spinner("Loading tender...");
    let res = client.tender(tender_id);
    spinner.finish_and_clear();
    let details = res.map_err(StageError::Status)?;
    for line in ui::status_lines(&details) {
        ui::note(line);
    }
    info!(%tender_id, "stage 5 complete");
    Ok(details)
}
