use super::prelude::*;
use crate::prompt::{DIMENSION_OPTIONS, ImageDimension, ImageUsage, USAGE_OPTIONS};

#[derive(Template, WebTemplate)]
#[template(path = "index.html")]
pub(crate) struct IndexTemplate {
    pub(crate) usage_options: Vec<&'static str>,
    pub(crate) dimension_options: Vec<&'static str>,
}

/// handles the / GET
pub(crate) async fn index_handler() -> IndexTemplate {
    IndexTemplate {
        usage_options: USAGE_OPTIONS.iter().map(ImageUsage::label).collect(),
        dimension_options: DIMENSION_OPTIONS
            .iter()
            .map(ImageDimension::label)
            .collect(),
    }
}
