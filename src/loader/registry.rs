use super::{ArrowCsvLoader, LoadError, LoaderStrategy, RawRecordsLoader};

/// Every built-in strategy, in reporting order.
pub fn default_strategies() -> Vec<Box<dyn LoaderStrategy>> {
    vec![
        Box::new(ArrowCsvLoader::inferred()),
        Box::new(ArrowCsvLoader::typed()),
        Box::new(ArrowCsvLoader::typed_sized()),
        Box::new(ArrowCsvLoader::typed_sized_categorical()),
        Box::new(RawRecordsLoader::new()),
    ]
}

/// Names of the built-in strategies
pub fn strategy_names() -> Vec<String> {
    default_strategies()
        .iter()
        .map(|s| s.name().to_string())
        .collect()
}

/// Built-in strategies filtered to `names`, in registry order.
///
/// An empty selection means all strategies.
pub fn select_strategies(names: &[String]) -> Result<Vec<Box<dyn LoaderStrategy>>, LoadError> {
    let all = default_strategies();
    if names.is_empty() {
        return Ok(all);
    }

    if let Some(unknown) = names
        .iter()
        .find(|name| !all.iter().any(|s| s.name() == name.as_str()))
    {
        return Err(LoadError::UnknownStrategy(unknown.clone()));
    }

    Ok(all
        .into_iter()
        .filter(|s| names.iter().any(|name| name == s.name()))
        .collect())
}
