//! Static documentation manifest of the FlixMate features covered by the
//! integration suites. Nothing here is derived from an actual run.

use super::types::{CrudOperation, FeatureDescriptor, FeatureStatus, ManifestSummary, TestCoverage};

pub const MANIFEST_KIND: &str = "static-documentation";

fn feature(name: &str, endpoints: &[&str], ops: &[CrudOperation]) -> FeatureDescriptor {
    FeatureDescriptor {
        name: name.to_string(),
        endpoints: endpoints.iter().map(|e| e.to_string()).collect(),
        crud_operations: ops.to_vec(),
        status: FeatureStatus::Tested,
    }
}

pub fn features() -> Vec<FeatureDescriptor> {
    use CrudOperation::*;

    vec![
        feature(
            "Movie Listings and Showtimes",
            &[
                "POST /api/movies - Create movie",
                "GET /api/movies - Get all movies",
                "GET /api/movies/{id} - Get movie by ID",
                "PUT /api/movies/{id} - Update movie",
                "DELETE /api/movies/{id} - Delete movie",
            ],
            &[Create, Read, Update, Delete],
        ),
        feature(
            "Performance, Revenue, and Trends (Reports)",
            &[
                "POST /api/reports - Create report",
                "GET /api/reports - Get all reports",
                "GET /api/reports/{id} - Get report by ID",
                "GET /api/reports/revenue - Get revenue report",
                "GET /api/reports/popularity - Get popularity report",
                "GET /api/reports/ticket-sales - Get ticket sales report",
                "DELETE /api/reports/{id} - Delete report",
            ],
            &[Create, Read, Delete],
        ),
        feature(
            "Secure Payment Processing",
            &[
                "POST /api/payments - Process payment",
                "GET /api/payments/logs - Get payment logs",
                "GET /api/payments/{id} - Get payment by ID",
                "PUT /api/payments/{id} - Update payment status",
                "DELETE /api/payments/{id} - Delete payment",
            ],
            &[Create, Read, Update, Delete],
        ),
        feature(
            "Book Tickets (Seat Selection & Checkout)",
            &[
                "POST /api/bookings/{showtimeId} - Create booking",
                "GET /api/bookings/user - Get user bookings",
                "GET /api/bookings/available/{showtimeId} - Get available seats",
                "GET /api/bookings/{id} - Get booking by ID",
                "PUT /api/bookings/{id} - Update booking",
                "DELETE /api/bookings/{id} - Delete booking",
            ],
            &[Create, Read, Update, Delete],
        ),
        feature(
            "Browse Movies, Showtimes, and Locations",
            &[
                "GET /api/movies - Browse movies with filters",
                "GET /api/movies?title=query - Search by title",
                "GET /api/movies?genre=Action - Filter by genre",
                "GET /api/movies?year=2025 - Filter by year",
            ],
            &[Read],
        ),
        feature(
            "Rate and Review Movies",
            &[
                "POST /api/movies/{movieId}/reviews - Add review",
                "GET /api/movies/{movieId}/reviews - Get movie reviews",
                "PUT /api/movies/{movieId}/reviews/{reviewId} - Update review",
                "DELETE /api/movies/{movieId}/reviews/{reviewId} - Delete review",
            ],
            &[Create, Read, Update, Delete],
        ),
    ]
}

/// Coverage numbers computed from the manifest entries
pub fn coverage(features: &[FeatureDescriptor]) -> TestCoverage {
    let crud_operations_covered = CrudOperation::ALL
        .iter()
        .filter(|op| features.iter().any(|f| f.crud_operations.contains(*op)))
        .copied()
        .collect();

    TestCoverage {
        total_functions: features.len() as u32,
        functions_tested: features
            .iter()
            .filter(|f| f.status == FeatureStatus::Tested)
            .count() as u32,
        total_endpoints: features.iter().map(|f| f.endpoints.len() as u32).sum(),
        crud_operations_covered,
        error_handling_tested: true,
        data_integrity_verified: true,
        authentication_tested: true,
        authorization_tested: true,
    }
}

pub fn build_summary(test_execution_time: String) -> ManifestSummary {
    let functions_tested = features();
    let test_coverage = coverage(&functions_tested);
    ManifestSummary {
        test_execution_time,
        manifest_kind: MANIFEST_KIND.to_string(),
        functions_tested,
        test_coverage,
    }
}
