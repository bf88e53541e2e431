//! The `compartments` data source.

use async_trait::async_trait;
use serde_json::{Map, Value};
use tfo_error::{FilterError, Result, StateError, TfoError};
use tfo_traits::{IdentityClient, ResourceData, ResourceReader};
use tfo_types::{AccessLevel, Compartment, ListCompartmentsRequest};
use tracing::{debug, info};

use crate::filter::{FilterSet, FilterSpec};
use crate::lifecycle::{generate_data_source_id, read_resource};
use crate::lister::PaginatedLister;
use crate::project::{CompartmentView, project};
use crate::retry::RetryPolicy;
use crate::schema::{ResourceSchema, compartment_item_schema, compartments_data_source_schema};
use crate::state::StateData;
use crate::stats::ListingStats;

const COMPARTMENTS_KEY: &str = "compartments";

/// Lists the compartments under a root compartment into resource state.
pub struct CompartmentsDataSource<C> {
    lister: PaginatedLister<C>,
    page_limit: Option<u32>,
}

impl<C: IdentityClient> CompartmentsDataSource<C> {
    /// Create a data source over `client`, retrying each page per `retry`.
    pub fn new(client: C, retry: RetryPolicy) -> Self {
        Self {
            lister: PaginatedLister::new(client, retry),
            page_limit: None,
        }
    }

    /// Ask the service for at most `limit` records per page.
    pub fn with_page_limit(mut self, limit: u32) -> Self {
        self.page_limit = Some(limit);
        self
    }

    /// The declared schema: inputs plus the computed `compartments` list.
    pub fn schema() -> ResourceSchema {
        compartments_data_source_schema()
    }

    pub fn lister(&self) -> &PaginatedLister<C> {
        &self.lister
    }

    /// Validate a configuration object and read into fresh state.
    pub async fn read(&self, config: Value) -> Result<(StateData, ListingStats)> {
        let mut data = StateData::from_config(Self::schema(), config)?;
        let stats = self.read_into(&mut data).await?;
        Ok((data, stats))
    }

    /// Read into existing resource data.
    ///
    /// When the root compartment is gone the state is voided and the read
    /// still succeeds.
    pub async fn read_into<D: ResourceData>(&self, data: &mut D) -> Result<ListingStats> {
        let mut crud = CompartmentsDataSourceCrud::new(&self.lister, data);
        crud.page_limit = self.page_limit;

        read_resource(&mut crud).await?;

        let mut stats = crud.stats;
        stats.complete();
        info!(
            pages = stats.pages_fetched,
            listed = stats.records_listed,
            output = stats.records_output,
            filtered = stats.records_filtered,
            "Read compartments data source"
        );
        Ok(stats)
    }
}

/// The get/set-data steps of one `compartments` read.
pub struct CompartmentsDataSourceCrud<'a, C, D> {
    lister: &'a PaginatedLister<C>,
    data: &'a mut D,
    page_limit: Option<u32>,
    res: Option<Vec<Compartment>>,
    stats: ListingStats,
}

impl<'a, C: IdentityClient, D: ResourceData> CompartmentsDataSourceCrud<'a, C, D> {
    pub fn new(lister: &'a PaginatedLister<C>, data: &'a mut D) -> Self {
        Self {
            lister,
            data,
            page_limit: None,
            res: None,
            stats: ListingStats::new(),
        }
    }

    /// Records fetched by `get`, if it ran.
    pub fn records(&self) -> Option<&[Compartment]> {
        self.res.as_deref()
    }

    pub fn stats(&self) -> &ListingStats {
        &self.stats
    }

    /// Build the list request from configuration.
    fn build_request(&self) -> Result<ListCompartmentsRequest> {
        let mut request = ListCompartmentsRequest::default();

        if let Some(access_level) = self.string_value("access_level")? {
            request.access_level = Some(access_level.parse::<AccessLevel>()?);
        }

        if let Some(compartment_id) = self.string_value("compartment_id")? {
            request.compartment_id = Some(compartment_id.to_string());
        }

        if let Some(in_subtree) = self.data.get_ok("compartment_id_in_subtree") {
            let in_subtree = in_subtree.as_bool().ok_or_else(|| {
                TfoError::Config("compartment_id_in_subtree must be a bool".to_string())
            })?;
            request.compartment_id_in_subtree = Some(in_subtree);
        }

        request.limit = self.page_limit;
        Ok(request)
    }

    fn string_value(&self, key: &str) -> Result<Option<&str>> {
        match self.data.get_ok(key) {
            None => Ok(None),
            Some(Value::String(s)) => Ok(Some(s.as_str())),
            Some(_) => Err(TfoError::Config(format!("{key} must be a string"))),
        }
    }

    fn filter_specs(&self) -> Result<Option<Vec<FilterSpec>>> {
        let Some(filter) = self.data.get_ok("filter") else {
            return Ok(None);
        };
        let specs = serde_json::from_value(filter.clone())
            .map_err(|e| FilterError::Malformed(e.to_string()))?;
        Ok(Some(specs))
    }
}

#[async_trait]
impl<'a, C: IdentityClient, D: ResourceData> ResourceReader for CompartmentsDataSourceCrud<'a, C, D> {
    async fn get(&mut self) -> Result<()> {
        let request = self.build_request()?;
        let records = self
            .lister
            .fetch_all_with_stats(request, &mut self.stats)
            .await?;
        self.res = Some(records);
        Ok(())
    }

    fn set_data(&mut self) -> Result<()> {
        let Some(records) = self.res.as_deref() else {
            return Ok(());
        };

        // Everything that can fail runs before state is touched
        let filters = match self.filter_specs()? {
            Some(specs) => Some(FilterSet::from_specs(&specs, &compartment_item_schema())?),
            None => None,
        };

        let mut items = project(records)
            .iter()
            .map(view_to_map)
            .collect::<Result<Vec<_>>>()?;
        let before = items.len();

        if let Some(filters) = filters {
            debug!(filters = ?filters, "Filtering compartments");
            items = filters.apply(items);
        }
        self.stats.record_filtered(before, items.len());

        let items = items.into_iter().map(Value::Object).collect();
        self.data.set(COMPARTMENTS_KEY, Value::Array(items))?;
        self.data.set_id(&generate_data_source_id());
        Ok(())
    }

    fn void_state(&mut self) {
        self.data.set_id("");
    }
}

fn view_to_map(view: &CompartmentView) -> Result<Map<String, Value>> {
    match serde_json::to_value(view) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(other) => Err(StateError::Set {
            key: COMPARTMENTS_KEY.to_string(),
            reason: format!("projected item is not an object: {other}"),
        }
        .into()),
        Err(e) => Err(StateError::Set {
            key: COMPARTMENTS_KEY.to_string(),
            reason: e.to_string(),
        }
        .into()),
    }
}
