use sha2::{Digest, Sha256};
use std::collections::HashMap;

/// Cache key generator for the corpus fetcher's requests.
pub struct CacheKeyGenerator;

impl CacheKeyGenerator {
    /// Generate a cache key from an endpoint and its sorted parameters.
    ///
    /// The key is a SHA256 hash of the endpoint and parameters (sorted
    /// by name for consistency regardless of insertion order).
    pub fn generate_key(endpoint: &str, params: &HashMap<String, String>) -> String {
        let mut hasher = Sha256::new();
        hasher.update(endpoint.as_bytes());
        hasher.update(b"|");

        let mut sorted_params: Vec<(&String, &String)> = params.iter().collect();
        sorted_params.sort_by_key(|(k, _)| *k);

        for (key, value) in sorted_params {
            hasher.update(key.as_bytes());
            hasher.update(b"=");
            hasher.update(value.as_bytes());
            hasher.update(b"&");
        }

        let result = hasher.finalize();
        format!("law:{result:x}")
    }

    /// Generate a key for a plain exact-phrase law search.
    pub fn search_key(query: &str, page: u32, size: u32) -> String {
        let mut params = HashMap::new();
        params.insert("query".to_string(), query.to_string());
        params.insert("page".to_string(), page.to_string());
        params.insert("size".to_string(), size.to_string());
        Self::generate_key("lawSearch.do", &params)
    }

    /// Generate a key for a single law's full text, keyed by MST.
    pub fn law_text_key(mst: &str) -> String {
        let mut params = HashMap::new();
        params.insert("mst".to_string(), mst.to_string());
        Self::generate_key("lawService.do", &params)
    }

    /// Validate cache key format (`law:<64-hex-char hash>`).
    pub fn is_valid_key(key: &str) -> bool {
        match key.split_once(':') {
            Some(("law", hash)) => hash.len() == 64 && hash.chars().all(|c| c.is_ascii_hexdigit()),
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_key_consistency() {
        let mut params = HashMap::new();
        params.insert("query".to_string(), "test".to_string());
        params.insert("page".to_string(), "1".to_string());

        let key1 = CacheKeyGenerator::generate_key("/api/search", &params);
        let key2 = CacheKeyGenerator::generate_key("/api/search", &params);
        assert_eq!(key1, key2);
    }

    #[test]
    fn test_generate_key_different_params() {
        let mut params1 = HashMap::new();
        params1.insert("query".to_string(), "test1".to_string());
        let mut params2 = HashMap::new();
        params2.insert("query".to_string(), "test2".to_string());

        let key1 = CacheKeyGenerator::generate_key("/api/search", &params1);
        let key2 = CacheKeyGenerator::generate_key("/api/search", &params2);
        assert_ne!(key1, key2);
    }

    #[test]
    fn test_parameter_order_independence() {
        let mut params1 = HashMap::new();
        params1.insert("a".to_string(), "1".to_string());
        params1.insert("b".to_string(), "2".to_string());
        let mut params2 = HashMap::new();
        params2.insert("b".to_string(), "2".to_string());
        params2.insert("a".to_string(), "1".to_string());

        let key1 = CacheKeyGenerator::generate_key("/api/search", &params1);
        let key2 = CacheKeyGenerator::generate_key("/api/search", &params2);
        assert_eq!(key1, key2);
    }

    #[test]
    fn test_key_validation() {
        let valid_key = format!("law:{}", "a".repeat(64));
        assert!(CacheKeyGenerator::is_valid_key(&valid_key));
        assert!(!CacheKeyGenerator::is_valid_key("invalid_format"));
        assert!(!CacheKeyGenerator::is_valid_key("law:short_hash"));
    }

    #[test]
    fn test_search_key_stable() {
        let k1 = CacheKeyGenerator::search_key("지방법원", 1, 100);
        let k2 = CacheKeyGenerator::search_key("지방법원", 1, 100);
        assert_eq!(k1, k2);
        assert!(k1.starts_with("law:"));
    }
}
