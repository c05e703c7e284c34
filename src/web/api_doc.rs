use utoipa::OpenApi;

use super::api::error::ErrorResponse;

#[derive(OpenApi)]
#[openapi(
    paths(
        super::api::satellites::list_satellites,
        super::api::visibility::visibility,
        super::api::visibility::visibility_summary,
    ),
    components(
        schemas(
            ErrorResponse,
            crate::catalog::SatelliteInfo,
            crate::predict::VisibilityRecord,
            crate::predict::CompassPoint,
            crate::predict::RunSummary,
            crate::predict::SatelliteFailure,
        )
    ),
    info(
        title = "Trainspotter API",
        description = "Visible passes of satellite trains over the configured observer",
        version = "0.1.0"
    ),
    tags(
        (name = "catalog", description = "Loaded orbital elements"),
        (name = "visibility", description = "Pass predictions")
    )
)]
pub struct ApiDoc;
