//! Tool registry for the agent tier.

use crate::data;
use compact_str::CompactString;
use schemars::JsonSchema;
use std::{collections::BTreeMap, future::Future, pin::Pin, sync::Arc};
use wcore::{Error, Payload, Result, Tool};

/// Name of the weather tool.
pub const WEATHER_LOOKUP: &str = "weather-lookup";

/// Name of the restaurant tool.
pub const RESTAURANT_SEARCH: &str = "restaurant-search";

/// A type-erased async tool handler, given the raw JSON arguments.
pub type Handler = Arc<
    dyn Fn(String) -> Pin<Box<dyn Future<Output = anyhow::Result<Payload>> + Send>> + Send + Sync,
>;

/// Parameters for the weather-lookup tool
#[allow(dead_code)]
#[derive(JsonSchema)]
struct WeatherParams {
    /// The place to look up, e.g. a neighbourhood in Seoul
    location: String,
}

/// Parameters for the restaurant-search tool
#[allow(dead_code)]
#[derive(JsonSchema)]
struct RestaurantParams {
    /// The kind of food or the area to search
    query: Option<String>,
}

/// Maps tool names to their metadata and handlers.
#[derive(Clone, Default)]
pub struct ToolRegistry {
    tools: BTreeMap<CompactString, (Tool, Handler)>,
}

impl ToolRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// The weather and restaurant tools backed by [`data`].
    ///
    /// Both handlers ignore their arguments.
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        registry.register(
            Tool {
                name: WEATHER_LOOKUP.into(),
                description: "Gets the current weather for a place in Seoul, \
                              e.g. to check the weather on the picnic day."
                    .into(),
                parameters: schemars::schema_for!(WeatherParams),
            },
            |_| async { Ok(Payload::Text(data::weather())) },
        );
        registry.register(
            Tool {
                name: RESTAURANT_SEARCH.into(),
                description: "Lists good restaurants nearby or of a given kind, \
                              e.g. picnic food to take away."
                    .into(),
                parameters: schemars::schema_for!(RestaurantParams),
            },
            |_| async { Ok::<_, anyhow::Error>(Payload::Records(data::restaurant_records()?)) },
        );
        registry
    }

    /// Register a tool with its handler, replacing any tool of the same name.
    pub fn register<F, Fut>(&mut self, tool: Tool, handler: F)
    where
        F: Fn(String) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = anyhow::Result<Payload>> + Send + 'static,
    {
        let name = tool.name.clone();
        let handler: Handler = Arc::new(move |args| Box::pin(handler(args)));
        self.tools.insert(name, (tool, handler));
    }

    /// Metadata for every registered tool, as exposed to the model.
    pub fn tools(&self) -> Vec<Tool> {
        self.tools.values().map(|(tool, _)| tool.clone()).collect()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.tools.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    /// Invoke the named tool.
    pub async fn call(&self, name: &str, arguments: &str) -> Result<Payload> {
        let Some((_, handler)) = self.tools.get(name) else {
            return Err(Error::UnknownTool(name.to_owned()));
        };

        tracing::debug!(tool = name, arguments, "dispatching tool");
        handler(arguments.to_owned()).await.map_err(|e| Error::Tool {
            name: name.to_owned(),
            reason: format!("{e:#}"),
        })
    }
}
