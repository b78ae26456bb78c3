/// Hover text for a node: id, degree and community, one per line.
pub fn hover_label(id: &str, degree: usize, community_id: f64) -> String {
	format!("{id}\nDegree: {degree}\nCommunity ID: {community_id}")
}
