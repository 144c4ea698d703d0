use crate::models::applicant::Applicant;
use crate::models::prospect::{MatchProspect, ProspectInput, ORIGIN_MANUAL_SELECTION};
use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};

/// Score assumed for a candidate whose prospect carries none.
pub const DEFAULT_SEMANTIC_SCORE: f64 = 0.5;

/// Where the current candidate list came from. The UI distinguishes a
/// reload of the persisted shortlist from a fresh chat-driven filter, so
/// the sentinel is a distinct variant rather than a magic label.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Provenance {
    #[default]
    None,
    SavedShortlist,
    Query(String),
}

impl Provenance {
    pub fn query_label(&self) -> Option<&str> {
        match self {
            Provenance::Query(q) => Some(q),
            _ => None,
        }
    }
}

/// Merges persisted prospects, chat-filtered candidates and local toggles
/// into one authoritative candidate view, and computes the payload to
/// persist on save. Pure state; all I/O lives in the session controller.
#[derive(Debug, Default)]
pub struct SelectionReconciler {
    candidates: Vec<Applicant>,
    selected_ids: HashSet<i64>,
    provenance: Provenance,
}

impl SelectionReconciler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn candidates(&self) -> &[Applicant] {
        &self.candidates
    }

    pub fn selected_ids(&self) -> &HashSet<i64> {
        &self.selected_ids
    }

    pub fn selected_count(&self) -> usize {
        self.selected_ids.len()
    }

    pub fn is_selected(&self, applicant_id: i64) -> bool {
        self.selected_ids.contains(&applicant_id)
    }

    pub fn provenance(&self) -> &Provenance {
        &self.provenance
    }

    /// Rebuild state from the persisted shortlist. Applicants are annotated
    /// with their prospect's score and selection flag, then ordered
    /// selected-first and by descending score within each partition, so
    /// reviewers see confirmed choices before the best algorithmic matches.
    pub fn load_saved(&mut self, prospects: &[MatchProspect], applicants: Vec<Applicant>) {
        let by_id: HashMap<i64, &MatchProspect> =
            prospects.iter().map(|p| (p.applicant_id, p)).collect();

        self.selected_ids = prospects
            .iter()
            .filter(|p| p.selected)
            .map(|p| p.applicant_id)
            .collect();

        self.candidates = applicants;
        for candidate in &mut self.candidates {
            let prospect = by_id.get(&candidate.id);
            candidate.semantic_score = Some(
                prospect
                    .map(|p| p.semantic_score)
                    .unwrap_or(DEFAULT_SEMANTIC_SCORE),
            );
            candidate.selected = Some(prospect.map(|p| p.selected).unwrap_or(false));
        }

        // Stable sort keeps the incoming order for score ties.
        self.candidates.sort_by(|a, b| {
            let selected_a = a.selected.unwrap_or(false);
            let selected_b = b.selected.unwrap_or(false);
            selected_b.cmp(&selected_a).then_with(|| {
                score_of(b)
                    .partial_cmp(&score_of(a))
                    .unwrap_or(Ordering::Equal)
            })
        });

        self.provenance = if prospects.is_empty() {
            Provenance::None
        } else {
            Provenance::SavedShortlist
        };
    }

    /// Chat-driven update: the filtered list replaces the candidates
    /// wholesale, in the backend's order, tagged with the literal query
    /// text. Selection is an explicit action layered over whatever the
    /// current list is, so `selected_ids` is left untouched.
    pub fn apply_chat_filter(&mut self, candidates: Vec<Applicant>, query: &str) {
        if candidates.is_empty() {
            return;
        }
        self.candidates = candidates;
        self.provenance = Provenance::Query(query.to_string());
    }

    /// Local toggle only; persisting happens on save.
    pub fn set_selected(&mut self, applicant_id: i64, selected: bool) {
        if selected {
            self.selected_ids.insert(applicant_id);
        } else {
            self.selected_ids.remove(&applicant_id);
        }
        if let Some(candidate) = self.candidates.iter_mut().find(|c| c.id == applicant_id) {
            candidate.selected = Some(selected);
        }
    }

    /// Payload for the replace-semantics persistence call: one record per
    /// selected id that still has a current candidate, in candidate order.
    /// Selected ids without a candidate are silently dropped; an empty
    /// selection yields the empty list, which clears the persisted set.
    pub fn save_payload(&self) -> Vec<ProspectInput> {
        self.candidates
            .iter()
            .filter(|c| self.selected_ids.contains(&c.id))
            .map(|c| ProspectInput {
                applicant_id: c.id,
                semantic_score: score_of(c),
                origin: ORIGIN_MANUAL_SELECTION.to_string(),
                selected: true,
                notes: None,
            })
            .collect()
    }

    /// Post-save reconciliation: a full clear of a previously saved
    /// shortlist empties the view to match the now-empty persisted state;
    /// any other save leaves the list as-is with selections sticky.
    pub fn finish_save(&mut self, saved_count: usize) {
        if saved_count == 0 && self.provenance == Provenance::SavedShortlist {
            self.candidates.clear();
            self.selected_ids.clear();
            self.provenance = Provenance::None;
        }
    }
}

fn score_of(candidate: &Applicant) -> f64 {
    candidate.semantic_score.unwrap_or(DEFAULT_SEMANTIC_SCORE)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::applicant::Cv;

    fn applicant(id: i64, score: Option<f64>) -> Applicant {
        Applicant {
            id,
            name: format!("Candidate {}", id),
            email: format!("c{}@example.com", id),
            cpf: None,
            phone: None,
            birth_date: None,
            highest_education: None,
            url_linkedin: None,
            updated_at: None,
            cv: Cv::default(),
            semantic_score: score,
            selected: None,
        }
    }

    fn prospect(id: i64, score: f64, selected: bool) -> MatchProspect {
        MatchProspect {
            workbook_id: "wb-1".to_string(),
            applicant_id: id,
            semantic_score: score,
            origin: "semantic_search".to_string(),
            selected,
            entry_date: None,
            notes: None,
        }
    }

    #[test]
    fn load_orders_selected_before_higher_scores() {
        let mut reconciler = SelectionReconciler::new();
        reconciler.load_saved(
            &[prospect(1, 0.3, true), prospect(2, 0.9, false)],
            vec![applicant(2, None), applicant(1, None)],
        );

        let order: Vec<i64> = reconciler.candidates().iter().map(|c| c.id).collect();
        assert_eq!(order, vec![1, 2]);
        assert_eq!(reconciler.selected_ids().len(), 1);
        assert!(reconciler.is_selected(1));
        assert_eq!(reconciler.provenance(), &Provenance::SavedShortlist);
    }

    #[test]
    fn load_orders_by_descending_score_within_selected_group() {
        let mut reconciler = SelectionReconciler::new();
        reconciler.load_saved(
            &[prospect(1, 0.4, true), prospect(2, 0.8, true)],
            vec![applicant(1, None), applicant(2, None)],
        );

        let order: Vec<i64> = reconciler.candidates().iter().map(|c| c.id).collect();
        assert_eq!(order, vec![2, 1]);
    }

    #[test]
    fn load_keeps_incoming_order_for_score_ties() {
        let mut reconciler = SelectionReconciler::new();
        reconciler.load_saved(
            &[
                prospect(10, 0.5, false),
                prospect(11, 0.5, false),
                prospect(12, 0.5, false),
            ],
            vec![applicant(11, None), applicant(10, None), applicant(12, None)],
        );

        let order: Vec<i64> = reconciler.candidates().iter().map(|c| c.id).collect();
        assert_eq!(order, vec![11, 10, 12]);
    }

    #[test]
    fn load_annotates_missing_scores_with_default() {
        let mut reconciler = SelectionReconciler::new();
        reconciler.load_saved(&[prospect(1, 0.7, true)], vec![applicant(1, None)]);
        assert_eq!(reconciler.candidates()[0].semantic_score, Some(0.7));

        // An applicant without a matching prospect falls back to 0.5.
        let mut other = SelectionReconciler::new();
        other.load_saved(&[prospect(1, 0.7, true)], vec![applicant(2, None)]);
        assert_eq!(
            other.candidates()[0].semantic_score,
            Some(DEFAULT_SEMANTIC_SCORE)
        );
    }

    #[test]
    fn chat_filter_replaces_list_and_preserves_selection() {
        let mut reconciler = SelectionReconciler::new();
        reconciler.load_saved(
            &[prospect(1, 0.6, true), prospect(2, 0.2, false)],
            vec![applicant(1, None), applicant(2, None)],
        );

        reconciler.apply_chat_filter(
            vec![applicant(7, Some(0.95)), applicant(8, Some(0.80))],
            "engenheiros com ingles fluente",
        );

        let order: Vec<i64> = reconciler.candidates().iter().map(|c| c.id).collect();
        assert_eq!(order, vec![7, 8]);
        assert!(reconciler.is_selected(1));
        assert_eq!(
            reconciler.provenance().query_label(),
            Some("engenheiros com ingles fluente")
        );
    }

    #[test]
    fn empty_chat_filter_is_ignored() {
        let mut reconciler = SelectionReconciler::new();
        reconciler.apply_chat_filter(vec![applicant(1, Some(0.9))], "primeira busca");
        reconciler.apply_chat_filter(vec![], "sem resultados");

        assert_eq!(reconciler.candidates().len(), 1);
        assert_eq!(reconciler.provenance().query_label(), Some("primeira busca"));
    }

    #[test]
    fn save_payload_is_exactly_selection_intersected_with_candidates() {
        let mut reconciler = SelectionReconciler::new();
        reconciler.apply_chat_filter(
            vec![
                applicant(1, Some(0.9)),
                applicant(2, Some(0.8)),
                applicant(3, Some(0.7)),
            ],
            "busca",
        );
        reconciler.set_selected(1, true);
        reconciler.set_selected(3, true);
        // Selected id with no current candidate must be dropped silently.
        reconciler.set_selected(99, true);

        let payload = reconciler.save_payload();
        let ids: Vec<i64> = payload.iter().map(|p| p.applicant_id).collect();
        assert_eq!(ids, vec![1, 3]);
        assert!(payload.iter().all(|p| p.selected));
        assert!(payload
            .iter()
            .all(|p| p.origin == ORIGIN_MANUAL_SELECTION));
        assert_eq!(payload[0].semantic_score, 0.9);
        assert_eq!(payload[1].semantic_score, 0.7);
    }

    #[test]
    fn empty_selection_saves_as_full_clear() {
        let mut reconciler = SelectionReconciler::new();
        reconciler.apply_chat_filter(vec![applicant(1, Some(0.9))], "busca");
        assert!(reconciler.save_payload().is_empty());
    }

    #[test]
    fn clearing_a_saved_shortlist_empties_the_view() {
        let mut reconciler = SelectionReconciler::new();
        reconciler.load_saved(&[prospect(1, 0.6, true)], vec![applicant(1, None)]);
        reconciler.set_selected(1, false);

        assert!(reconciler.save_payload().is_empty());
        reconciler.finish_save(0);

        assert!(reconciler.candidates().is_empty());
        assert!(reconciler.selected_ids().is_empty());
        assert_eq!(reconciler.provenance(), &Provenance::None);
    }

    #[test]
    fn clearing_a_chat_filtered_list_keeps_the_view() {
        let mut reconciler = SelectionReconciler::new();
        reconciler.apply_chat_filter(vec![applicant(1, Some(0.9))], "busca");
        reconciler.finish_save(0);

        assert_eq!(reconciler.candidates().len(), 1);
        assert_eq!(reconciler.provenance().query_label(), Some("busca"));
    }

    #[test]
    fn save_then_reload_round_trips_selection() {
        let mut reconciler = SelectionReconciler::new();
        reconciler.apply_chat_filter(
            vec![applicant(1, Some(0.9)), applicant(2, Some(0.8))],
            "busca",
        );
        reconciler.set_selected(1, true);
        reconciler.set_selected(2, true);

        // Persisting and reloading goes through the prospect shape.
        let persisted: Vec<MatchProspect> = reconciler
            .save_payload()
            .into_iter()
            .map(|input| MatchProspect {
                workbook_id: "wb-1".to_string(),
                applicant_id: input.applicant_id,
                semantic_score: input.semantic_score,
                origin: input.origin,
                selected: input.selected,
                entry_date: None,
                notes: None,
            })
            .collect();

        let mut reloaded = SelectionReconciler::new();
        reloaded.load_saved(&persisted, vec![applicant(1, None), applicant(2, None)]);

        assert_eq!(reloaded.selected_ids().len(), 2);
        assert!(reloaded.is_selected(1));
        assert!(reloaded.is_selected(2));
    }
}
