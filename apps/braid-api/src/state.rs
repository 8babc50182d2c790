use std::sync::Arc;

use braid_directory::{Directory, HttpDirectory, NoDirectory};
use braid_service::TaskExecutor;
use braid_store::{MessageStore, client::ElasticStore};

#[derive(Clone)]
pub struct AppState {
	pub executor: Arc<TaskExecutor>,
	pub directory: Arc<dyn Directory>,
	pub page_size: u32,
}

impl AppState {
	pub fn new(config: braid_config::Config) -> color_eyre::Result<Self> {
		let store = Arc::new(ElasticStore::new(&config.store)?);
		let directory: Arc<dyn Directory> = match config.directory.as_ref() {
			Some(directory) => Arc::new(HttpDirectory::new(directory)?),
			None => Arc::new(NoDirectory),
		};

		Ok(Self::assemble(store, directory, &config))
	}

	/// Wires an executor over any store implementation; route tests inject
	/// an in-memory one here.
	pub fn assemble(
		store: Arc<dyn MessageStore>,
		directory: Arc<dyn Directory>,
		config: &braid_config::Config,
	) -> Self {
		Self {
			executor: Arc::new(TaskExecutor::new(store, config)),
			directory,
			page_size: config.store.page_size,
		}
	}
}
