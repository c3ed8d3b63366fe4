use serde::Serialize;

/// A disaster-mitigation article card.
#[derive(Debug, Clone, Serialize)]
pub struct Article {
    pub id: u32,
    pub category: &'static str,
    pub title: &'static str,
    pub excerpt: &'static str,
    pub date: &'static str,
    pub image: &'static str,
    pub image_alt: &'static str,
    pub author: &'static str,
}

pub static ARTICLES: [Article; 6] = [
    Article {
        id: 1,
        category: "Tips",
        title: "Tips Mitigasi Banjir untuk Masyarakat Aceh",
        excerpt: "Panduan lengkap untuk masyarakat dalam menghadapi ancaman banjir. Termasuk persiapan darurat, jalur evakuasi, dan perlengkapan yang harus disiapkan.",
        date: "2025-01-15",
        image: "https://images.unsplash.com/photo-1741081288260-877057e3fa27?crop=entropy&cs=srgb&fm=jpg&ixlib=rb-4.1.0&q=85",
        image_alt: "Tim relawan membantu evakuasi saat banjir - Photo by Iqro Rinaldi on Unsplash",
        author: "BNPB Aceh",
    },
    Article {
        id: 2,
        category: "Teknologi",
        title: "Sistem Peringatan Dini Bencana di Aceh",
        excerpt: "Teknologi terkini dalam sistem peringatan dini banjir menggunakan sensor cuaca, monitoring sungai, dan alert system berbasis SMS untuk masyarakat.",
        date: "2025-01-10",
        image: "https://images.pexels.com/photos/29436201/pexels-photo-29436201.jpeg",
        image_alt: "Stasiun cuaca untuk monitoring bencana - Photo by Charles Criscuolo on Pexels",
        author: "BMKG Aceh",
    },
    Article {
        id: 3,
        category: "Lingkungan",
        title: "Program Reboisasi Hutan untuk Cegah Banjir",
        excerpt: "Pentingnya reboisasi hutan dan konservasi lahan untuk mengurangi risiko banjir. Program penanaman 10,000 pohon di daerah rawan banjir Aceh.",
        date: "2025-01-05",
        image: "https://images.unsplash.com/photo-1632397782627-29040fc97a4b?crop=entropy&cs=srgb&fm=jpg&ixlib=rb-4.1.0&q=85",
        image_alt: "Hutan hijau yang lebat - Photo by boris misevic on Unsplash",
        author: "Dinas Lingkungan Hidup",
    },
    Article {
        id: 4,
        category: "Infrastruktur",
        title: "Normalisasi Sungai dan Perbaikan Drainase",
        excerpt: "Proyek normalisasi sungai dan perbaikan sistem drainase di 15 titik rawan banjir. Target pengerukan 50,000 m³ sedimen untuk kelancaran aliran air.",
        date: "2024-12-28",
        image: "https://images.unsplash.com/photo-1562544294-3484049612ce?crop=entropy&cs=srgb&fm=jpg&ixlib=rb-4.1.0&q=85",
        image_alt: "Sistem drainase dan pengelolaan air - Photo by Chandler Cruttenden on Unsplash",
        author: "Dinas Pekerjaan Umum",
    },
    Article {
        id: 5,
        category: "Kesiapsiagaan",
        title: "Kesiapsiagaan Menghadapi Musim Hujan 2025",
        excerpt: "Persiapan menghadapi musim hujan dengan prediksi curah hujan tinggi. Checklist lengkap untuk keluarga dan komunitas dalam mengantisipasi banjir.",
        date: "2024-12-20",
        image: "https://images.unsplash.com/photo-1705102659473-97da402ca422?crop=entropy&cs=srgb&fm=jpg&ixlib=rb-4.1.0&q=85",
        image_alt: "Awan badai menandakan hujan deras - Photo by Raychel Sanner on Unsplash",
        author: "BPBD Aceh",
    },
    Article {
        id: 6,
        category: "Edukasi",
        title: "Pelatihan Tanggap Darurat untuk Relawan",
        excerpt: "Program pelatihan tanggap darurat bencana untuk relawan komunitas. Materi meliputi pertolongan pertama, evakuasi, dan koordinasi tim respons cepat.",
        date: "2024-12-15",
        image: "https://images.unsplash.com/photo-1581094373271-1fa59e2ab263?crop=entropy&cs=srgb&fm=jpg&ixlib=rb-4.1.0&q=85",
        image_alt: "Pelatihan tim tanggap darurat - Photo by ThisisEngineering on Unsplash",
        author: "PMI Aceh",
    },
];
