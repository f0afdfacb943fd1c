//! Page context endpoint handler.

use super::common::caller_context;
use crate::{
    models::{PageContext, UnitsQuery},
    services::{AccountStore, WeatherClient},
};
use actix_web::{Error, HttpRequest, Result, web};
use paperclip::actix::api_v2_operation;

/// Today's date and, for signed-in callers, current weather in each favorite city
#[api_v2_operation(
    summary = "Page Context",
    description = "Returns the current date and, when a bearer token is supplied, current conditions for each favorite city. Cities that fail to load are omitted.",
    tags("Weather")
)]
pub async fn page_context(
    req: HttpRequest,
    query: web::Query<UnitsQuery>,
    client: web::Data<WeatherClient>,
    accounts: web::Data<AccountStore>,
) -> Result<web::Json<PageContext>, Error> {
    let units = query.units.unwrap_or_default();
    Ok(web::Json(
        caller_context(&req, &accounts, &client, units).await,
    ))
}
